//! Category tree offered by the filter panel.
//!
//! Native builds may point `CATALOG_TAXONOMY_PATH` at a JSON tree of
//! `{"name": ..., "children": [...]}` nodes. Without it, or when the file is
//! unusable, the built-in tree is used.

use common::category_tree::{CategoryNode, CategoryTaxonomy};
use dioxus::logger::tracing;

pub const CATALOG_TAXONOMY_PATH_ENV: &str = "CATALOG_TAXONOMY_PATH";

pub fn load_taxonomy() -> CategoryTaxonomy {
    match taxonomy_override() {
        Some(json) => taxonomy_or_default(&json),
        None => default_taxonomy(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn taxonomy_override() -> Option<String> {
    let path = std::env::var(CATALOG_TAXONOMY_PATH_ENV).ok()?;
    match std::fs::read_to_string(&path) {
        Ok(json) => Some(json),
        Err(error) => {
            tracing::warn!(%path, %error, "cannot read category taxonomy, using the built-in one");
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn taxonomy_override() -> Option<String> {
    None
}

pub fn taxonomy_or_default(json: &str) -> CategoryTaxonomy {
    match serde_json::from_str::<CategoryTaxonomy>(json) {
        Ok(taxonomy) if !taxonomy.roots.is_empty() => taxonomy,
        Ok(_) => {
            tracing::warn!("category taxonomy is empty, using the built-in one");
            default_taxonomy()
        }
        Err(error) => {
            tracing::warn!(%error, "category taxonomy is not valid JSON, using the built-in one");
            default_taxonomy()
        }
    }
}

pub fn default_taxonomy() -> CategoryTaxonomy {
    CategoryTaxonomy::new(vec![
        CategoryNode::parent(
            "Недвижимость",
            vec![
                CategoryNode::leaf("Квартиры"),
                CategoryNode::leaf("Дома, дачи"),
                CategoryNode::leaf("Земельные участки"),
                CategoryNode::leaf("Коммерческая недвижимость"),
            ],
        ),
        CategoryNode::parent(
            "Транспорт",
            vec![
                CategoryNode::leaf("Легковые автомобили"),
                CategoryNode::leaf("Грузовые автомобили"),
                CategoryNode::leaf("Спецтехника"),
                CategoryNode::leaf("Мототехника"),
                CategoryNode::leaf("Водный транспорт"),
            ],
        ),
        CategoryNode::parent(
            "Оборудование",
            vec![
                CategoryNode::leaf("Промышленное оборудование"),
                CategoryNode::leaf("Сельскохозяйственная техника"),
                CategoryNode::leaf("Торговое оборудование"),
            ],
        ),
        CategoryNode::parent(
            "Имущественные права",
            vec![CategoryNode::leaf("Дебиторская задолженность"), CategoryNode::leaf("Доли в уставном капитале")],
        ),
        CategoryNode::parent("Прочее", vec![]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nested_json_tree_is_used_as_is() {
        let taxonomy = taxonomy_or_default(
            r#"[{"name": "Транспорт", "children": [
                {"name": "Автомобили", "children": [{"name": "Легковые"}, {"name": "Грузовые"}]},
                {"name": "Мототехника"}
            ]}]"#,
        );
        let transport = taxonomy.find("Транспорт").expect("root");
        assert_eq!(transport.descendant_leaves(), vec!["Легковые", "Грузовые", "Мототехника"]);
        assert!(!taxonomy.find("Автомобили").expect("nested parent").is_leaf());
    }

    #[test]
    fn unusable_json_falls_back_to_the_built_in_tree() {
        assert_eq!(taxonomy_or_default("{not json"), default_taxonomy());
        assert_eq!(taxonomy_or_default("[]"), default_taxonomy());
    }
}
