use mod_wardrobe_lib::core::listing::{
    self, AssetQuery, EntityQuery, SelectionState, SortKey,
};
use mod_wardrobe_lib::models::asset::Asset;
use mod_wardrobe_lib::models::entity::Entity;

fn asset(id: i64, name: &str, enabled: bool) -> Asset {
    Asset {
        id,
        entity_slug: "raiden-shogun".to_string(),
        name: name.to_string(),
        description: None,
        author: Some("tester".to_string()),
        category_tag: Some("Outfit,Skin".to_string()),
        folder_name: format!("characters/raiden-shogun/{name}"),
        image_filename: None,
        is_enabled: enabled,
    }
}

fn entity(slug: &str, name: &str, details: Option<&str>) -> Entity {
    Entity {
        slug: slug.to_string(),
        category_slug: "characters".to_string(),
        name: name.to_string(),
        description: None,
        details: details.map(str::to_string),
        base_image: None,
        total_mods: 0,
        enabled_mods: 0,
    }
}

#[test]
fn search_matches_exactly_one_asset_by_name_substring() {
    let assets = vec![asset(1, "Zeta", false), asset(2, "Alpha", true)];
    let filtered = listing::filter_assets(assets, "lph");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Alpha");
}

#[test]
fn search_is_case_insensitive_and_covers_author_and_tags() {
    let mut by_author = asset(1, "Plain", false);
    by_author.author = Some("MrMiagi".to_string());
    let by_tag = asset(2, "Sleek", false);

    let filtered = listing::filter_assets(vec![by_author.clone(), by_tag.clone()], "MRMIA");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, 1);

    let filtered = listing::filter_assets(vec![by_author, by_tag], "skin");
    assert_eq!(filtered.len(), 2); // tag "Outfit,Skin" matches both
}

#[test]
fn blank_search_keeps_everything() {
    let assets = vec![asset(1, "A", false), asset(2, "B", true)];
    assert_eq!(listing::filter_assets(assets, "  ").len(), 2);
}

#[test]
fn name_asc_is_non_decreasing() {
    let mut assets = vec![asset(1, "Zeta", false), asset(3, "Mid", true), asset(2, "Alpha", true)];
    listing::sort_assets(&mut assets, SortKey::NameAsc);
    let names: Vec<&str> = assets.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Mid", "Zeta"]);
}

#[test]
fn id_desc_is_non_increasing() {
    let mut assets = vec![asset(1, "Zeta", false), asset(3, "Mid", true), asset(2, "Alpha", true)];
    listing::sort_assets(&mut assets, SortKey::IdDesc);
    let ids: Vec<i64> = assets.iter().map(|a| a.id).collect();
    assert_eq!(ids, [3, 2, 1]);
}

#[test]
fn end_to_end_scenarios() {
    // The canonical two-asset scenario: Zeta(id 1, disabled), Alpha(id 2, enabled).
    let assets = || vec![asset(1, "Zeta", false), asset(2, "Alpha", true)];

    let sorted = listing::apply_asset_query(
        assets(),
        &AssetQuery {
            search: None,
            sort: Some(SortKey::NameAsc),
        },
    );
    assert_eq!(
        sorted.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
        ["Alpha", "Zeta"]
    );

    // Enabled group first.
    let sorted = listing::apply_asset_query(
        assets(),
        &AssetQuery {
            search: None,
            sort: Some(SortKey::EnabledDesc),
        },
    );
    assert_eq!(
        sorted.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
        ["Alpha", "Zeta"]
    );
    assert!(sorted[0].is_enabled && !sorted[1].is_enabled);

    // id-desc: Alpha has the higher id.
    let sorted = listing::apply_asset_query(
        assets(),
        &AssetQuery {
            search: None,
            sort: Some(SortKey::IdDesc),
        },
    );
    assert_eq!(sorted.iter().map(|a| a.id).collect::<Vec<_>>(), [2, 1]);
}

#[test]
fn enabled_desc_breaks_ties_by_name() {
    let mut assets = vec![
        asset(1, "Zeta", true),
        asset(2, "Alpha", true),
        asset(3, "Beta", false),
        asset(4, "Aardvark", false),
    ];
    listing::sort_assets(&mut assets, SortKey::EnabledDesc);
    let names: Vec<&str> = assets.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Alpha", "Zeta", "Aardvark", "Beta"]);
}

#[test]
fn other_bucket_sorts_first_regardless_of_key() {
    let make = || {
        vec![
            entity("raiden-shogun", "Raiden Shogun", None),
            entity("characters-other", "Other / Unknown", None),
            entity("eula", "Eula", None),
        ]
    };

    for key in [SortKey::NameAsc, SortKey::NameDesc, SortKey::IdDesc, SortKey::EnabledDesc] {
        let mut entities = make();
        listing::sort_entities(&mut entities, key);
        assert_eq!(entities[0].slug, "characters-other", "key {key}");
    }

    let mut entities = make();
    listing::sort_entities(&mut entities, SortKey::NameAsc);
    let slugs: Vec<&str> = entities.iter().map(|e| e.slug.as_str()).collect();
    assert_eq!(slugs, ["characters-other", "eula", "raiden-shogun"]);

    let mut entities = make();
    listing::sort_entities(&mut entities, SortKey::NameDesc);
    let slugs: Vec<&str> = entities.iter().map(|e| e.slug.as_str()).collect();
    assert_eq!(slugs, ["characters-other", "raiden-shogun", "eula"]);
}

#[test]
fn element_filter_reads_the_details_json() {
    let entities = vec![
        entity("eula", "Eula", Some(r#"{"element":"Cryo","rarity":5}"#)),
        entity("klee", "Klee", Some(r#"{"element":"Pyro","rarity":5}"#)),
        entity("fonts", "Fonts", None),
    ];
    let filtered = listing::apply_entity_query(
        entities,
        &EntityQuery {
            search: None,
            element: Some("pyro".to_string()),
            sort: None,
        },
    );
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].slug, "klee");
}

#[test]
fn select_all_checkbox_state() {
    assert_eq!(listing::selection_state(0, 0), SelectionState::Unchecked);
    assert_eq!(listing::selection_state(0, 4), SelectionState::Unchecked);
    assert_eq!(listing::selection_state(2, 4), SelectionState::Indeterminate);
    assert_eq!(listing::selection_state(4, 4), SelectionState::Checked);
    // Empty filtered list can never be "checked".
    assert_eq!(listing::selection_state(0, 0), SelectionState::Unchecked);
}
