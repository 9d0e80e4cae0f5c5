use crate::models::entity::Category;
use crate::models::error::WError;
use serde::Deserialize;
use std::collections::BTreeMap;

pub const OTHER_ENTITY_SUFFIX: &str = "-other";
pub const OTHER_ENTITY_NAME: &str = "Other / Unknown";

/// Raw shape of definitions/base_entities.toml: category slug -> definition.
#[derive(Deserialize, Debug)]
struct CategoryDef {
    name: String,
    entities: Vec<EntityDef>,
}

#[derive(Deserialize, Debug, Clone)]
struct EntityDef {
    name: String,
    slug: String,
    description: Option<String>,
    details: Option<String>,
    base_image: Option<String>,
}

/// One entity known to the application, either defined in the embedded
/// definitions file or synthesized as a category's "-other" bucket.
#[derive(Clone, Debug)]
pub struct DefinedEntity {
    pub slug: String,
    pub category_slug: String,
    pub name: String,
    pub description: Option<String>,
    pub details: Option<String>,
    pub base_image: Option<String>,
    pub is_other: bool,
}

/// Compiled-in category/entity catalog plus the lowercase lookup tables the
/// scan and import deduction paths need.
#[derive(Clone, Debug, Default)]
pub struct Definitions {
    pub categories: Vec<Category>,
    pub entities: Vec<DefinedEntity>,
    by_slug: BTreeMap<String, usize>,
    by_lower_name: BTreeMap<String, usize>,
    /// First word of a multi-word entity name, e.g. "raiden" -> raiden-shogun.
    /// Only kept when unambiguous.
    by_lower_first_word: BTreeMap<String, Option<usize>>,
}

pub fn other_slug(category_slug: &str) -> String {
    format!("{category_slug}{OTHER_ENTITY_SUFFIX}")
}

impl Definitions {
    pub fn load_embedded() -> Result<Self, WError> {
        Self::parse(include_str!("../../definitions/base_entities.toml"))
    }

    pub fn parse(text: &str) -> Result<Self, WError> {
        let raw: BTreeMap<String, CategoryDef> = toml::from_str(text)?;

        let mut defs = Definitions::default();
        for (category_slug, category) in raw {
            defs.categories.push(Category {
                slug: category_slug.clone(),
                name: category.name,
            });

            for entity in category.entities {
                defs.push(DefinedEntity {
                    slug: entity.slug,
                    category_slug: category_slug.clone(),
                    name: entity.name,
                    description: entity.description,
                    details: entity.details,
                    base_image: entity.base_image,
                    is_other: false,
                })?;
            }

            // Every category gets a fallback bucket for undeducible mods.
            defs.push(DefinedEntity {
                slug: other_slug(&category_slug),
                category_slug: category_slug.clone(),
                name: OTHER_ENTITY_NAME.to_string(),
                description: Some("Uncategorized mods.".to_string()),
                details: None,
                base_image: None,
                is_other: true,
            })?;
        }

        Ok(defs)
    }

    fn push(&mut self, entity: DefinedEntity) -> Result<(), WError> {
        if self.by_slug.contains_key(&entity.slug) {
            return Err(WError::Config(format!(
                "duplicate entity slug in definitions: {}",
                entity.slug
            )));
        }
        let index = self.entities.len();
        self.by_slug.insert(entity.slug.clone(), index);
        self.by_lower_name.insert(entity.name.to_lowercase(), index);
        if let Some(first_word) = entity.name.split_whitespace().next() {
            let key = first_word.to_lowercase();
            if key != entity.name.to_lowercase() {
                // None marks an ambiguous first word, which is then unusable.
                self.by_lower_first_word
                    .entry(key)
                    .and_modify(|slot| *slot = None)
                    .or_insert(Some(index));
            }
        }
        self.entities.push(entity);
        Ok(())
    }

    pub fn entity(&self, slug: &str) -> Option<&DefinedEntity> {
        self.by_slug.get(slug).map(|&i| &self.entities[i])
    }

    pub fn category(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn entities_in<'a>(
        &'a self,
        category_slug: &'a str,
    ) -> impl Iterator<Item = &'a DefinedEntity> {
        self.entities
            .iter()
            .filter(move |e| e.category_slug == category_slug)
    }

    /// Matches a raw ini `Target =` value (or similar hint) against known
    /// entities: exact slug, exact name, then unambiguous first name word.
    pub fn match_entity(&self, raw: &str) -> Option<&DefinedEntity> {
        let needle = raw.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        if let Some(e) = self.entity(&needle) {
            return Some(e);
        }
        if let Some(&i) = self.by_lower_name.get(&needle) {
            return Some(&self.entities[i]);
        }
        match self.by_lower_first_word.get(&needle) {
            Some(Some(i)) => Some(&self.entities[*i]),
            _ => None,
        }
    }

    /// Matches a raw ini `Type =` value against category slug or name.
    pub fn match_category(&self, raw: &str) -> Option<&Category> {
        let needle = raw.trim().to_lowercase();
        self.categories
            .iter()
            .find(|c| c.slug.to_lowercase() == needle || c.name.to_lowercase() == needle)
    }

    /// Best-effort entity deduction from a mod folder name: any known entity
    /// name or slug contained in the folder name wins, longest match first,
    /// then unambiguous first name words ("Raiden..." -> raiden-shogun).
    pub fn match_in_folder_name(&self, folder_name: &str) -> Option<&DefinedEntity> {
        let haystack = folder_name.to_lowercase();
        self.entities
            .iter()
            .filter(|e| !e.is_other)
            .filter(|e| {
                haystack.contains(&e.name.to_lowercase())
                    || haystack.contains(&e.slug.replace('-', ""))
                    || haystack.contains(e.slug.as_str())
            })
            .max_by_key(|e| e.name.len())
            .or_else(|| {
                self.by_lower_first_word
                    .iter()
                    .filter_map(|(word, index)| index.map(|i| (word, i)))
                    .filter(|(word, _)| haystack.contains(word.as_str()))
                    .max_by_key(|(word, _)| word.len())
                    .map(|(_, i)| &self.entities[i])
            })
    }
}
