use crate::models::asset::Asset;
use crate::models::entity::Entity;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use specta::Type;

/// Sort orders the frontend can ask for. `id` is a proxy for insertion
/// order, since ids are allocated monotonically.
#[derive(
    Serialize, Deserialize, Type, Display, Clone, Copy, PartialEq, Eq, Debug, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    #[display("name-asc")]
    NameAsc,
    #[display("name-desc")]
    NameDesc,
    #[display("id-asc")]
    IdAsc,
    #[display("id-desc")]
    IdDesc,
    /// Enabled group first; names ascending within each group.
    #[display("enabled-desc")]
    EnabledDesc,
}

#[derive(Serialize, Deserialize, Type, Clone, Debug, Default)]
pub struct AssetQuery {
    pub search: Option<String>,
    pub sort: Option<SortKey>,
}

#[derive(Serialize, Deserialize, Type, Clone, Debug, Default)]
pub struct EntityQuery {
    pub search: Option<String>,
    /// Matches the "element" field of the entity details JSON.
    pub element: Option<String>,
    pub sort: Option<SortKey>,
}

/// Select-all checkbox state over a filtered listing.
#[derive(Serialize, Type, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub enum SelectionState {
    Unchecked,
    Indeterminate,
    Checked,
}

pub fn selection_state(selected: usize, filtered: usize) -> SelectionState {
    if filtered > 0 && selected == filtered {
        SelectionState::Checked
    } else if selected > 0 && selected < filtered {
        SelectionState::Indeterminate
    } else {
        SelectionState::Unchecked
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Case-insensitive substring filter over name, author and tags.
pub fn filter_assets(assets: Vec<Asset>, search: &str) -> Vec<Asset> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return assets;
    }
    assets
        .into_iter()
        .filter(|a| {
            contains_ci(&a.name, &needle)
                || a.author.as_deref().is_some_and(|s| contains_ci(s, &needle))
                || a.category_tag
                    .as_deref()
                    .is_some_and(|s| contains_ci(s, &needle))
        })
        .collect()
}

/// Stable sort by the requested key.
pub fn sort_assets(assets: &mut [Asset], key: SortKey) {
    match key {
        SortKey::NameAsc => assets.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::NameDesc => assets.sort_by(|a, b| b.name.cmp(&a.name)),
        SortKey::IdAsc => assets.sort_by_key(|a| a.id),
        SortKey::IdDesc => assets.sort_by_key(|a| std::cmp::Reverse(a.id)),
        SortKey::EnabledDesc => {
            assets.sort_by(|a, b| {
                b.is_enabled
                    .cmp(&a.is_enabled)
                    .then_with(|| a.name.cmp(&b.name))
            });
        }
    }
}

pub fn apply_asset_query(assets: Vec<Asset>, query: &AssetQuery) -> Vec<Asset> {
    let mut assets = filter_assets(assets, query.search.as_deref().unwrap_or(""));
    sort_assets(&mut assets, query.sort.unwrap_or_default());
    assets
}

/// True when the entity's details JSON carries the given element.
pub fn entity_matches_element(entity: &Entity, element: &str) -> bool {
    let Some(details) = entity.details.as_deref() else {
        return false;
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(details) else {
        return false;
    };
    value
        .get("element")
        .and_then(|v| v.as_str())
        .is_some_and(|v| v.eq_ignore_ascii_case(element))
}

fn is_other(entity: &Entity) -> bool {
    entity.slug.ends_with(crate::core::definitions::OTHER_ENTITY_SUFFIX)
}

/// Stable entity sort. The "-other" bucket always precedes everything else,
/// regardless of the selected key; id-based keys fall back to name order
/// because entities have no numeric id.
pub fn sort_entities(entities: &mut [Entity], key: SortKey) {
    match key {
        SortKey::NameDesc => entities.sort_by(|a, b| {
            is_other(b)
                .cmp(&is_other(a))
                .then_with(|| b.name.cmp(&a.name))
        }),
        _ => entities.sort_by(|a, b| {
            is_other(b)
                .cmp(&is_other(a))
                .then_with(|| a.name.cmp(&b.name))
        }),
    }
}

pub fn apply_entity_query(entities: Vec<Entity>, query: &EntityQuery) -> Vec<Entity> {
    let needle = query
        .search
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let mut entities: Vec<Entity> = entities
        .into_iter()
        .filter(|e| needle.is_empty() || contains_ci(&e.name, &needle))
        .filter(|e| {
            query
                .element
                .as_deref()
                .map_or(true, |el| entity_matches_element(e, el))
        })
        .collect();
    sort_entities(&mut entities, query.sort.unwrap_or_default());
    entities
}
