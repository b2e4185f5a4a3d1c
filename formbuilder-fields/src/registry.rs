//! FieldTypeRegistry — the catalog of field types and palette categories.
//!
//! One registry per builder instance, never a process-wide singleton, so two
//! builders on the same host can carry different custom types. A registry
//! starts from the built-in catalog (or empty) and grows through explicit
//! registration; overwriting an existing key is allowed and only logged.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use crate::defaults::{base_properties, builtin_categories, builtin_types};
use crate::error::{FieldsError, Result};
use crate::types::{
    Category, CategoryGroup, CategoryPatch, FieldSeed, FieldTypeDef, InstanceOptions, TypePatch,
};

/// Catalog of field types and their palette categories.
#[derive(Debug, Clone)]
pub struct FieldTypeRegistry {
    types: IndexMap<String, FieldTypeDef>,
    categories: IndexMap<String, Category>,
}

impl FieldTypeRegistry {
    /// An empty registry with no types or categories.
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
            categories: IndexMap::new(),
        }
    }

    /// A registry seeded with the built-in catalog.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (key, category) in builtin_categories() {
            registry.categories.insert(key.to_string(), category);
        }
        for def in builtin_types() {
            registry.types.insert(def.key.clone(), def);
        }
        registry
    }

    /// Look up a field type by key.
    pub fn get(&self, key: &str) -> Option<&FieldTypeDef> {
        self.types.get(key)
    }

    /// True when the key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.types.contains_key(key)
    }

    /// Look up a category by key.
    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.get(key)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when no types are registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Register a field type, merging the patch over defaults
    /// (`category = "BASIC"`, empty-string default value, empty rule set).
    ///
    /// Last writer wins: an existing key is overwritten with only a warning.
    pub fn register_type(&mut self, key: impl Into<String>, patch: TypePatch) {
        let key = key.into();
        if self.types.contains_key(&key) {
            warn!(key = %key, "field type already registered, overwriting");
        }

        let def = FieldTypeDef {
            key: key.clone(),
            label: patch.label.unwrap_or_else(|| key.clone()),
            icon: patch.icon.unwrap_or_default(),
            description: patch.description.unwrap_or_default(),
            category: patch.category.unwrap_or_else(|| "BASIC".into()),
            default_value: patch
                .default_value
                .unwrap_or_else(|| Value::String(String::new())),
            validation: patch.validation.unwrap_or_default(),
            placeholder: patch.placeholder.unwrap_or_default(),
            formatter: patch.formatter,
            options: patch.options,
            rows: patch.rows,
            format: patch.format,
        };
        debug!(key = %key, category = %def.category, "registered field type");
        self.types.insert(key, def);
    }

    /// Register a palette category. An unset `order` defaults to one past
    /// the current category count. Same overwrite semantics as
    /// [`register_type`](Self::register_type).
    pub fn register_category(&mut self, key: impl Into<String>, patch: CategoryPatch) {
        let key = key.into();
        if self.categories.contains_key(&key) {
            warn!(key = %key, "field category already registered, overwriting");
        }

        let category = Category {
            label: patch.label.unwrap_or_else(|| key.clone()),
            icon: patch.icon.unwrap_or_default(),
            order: patch
                .order
                .unwrap_or_else(|| self.categories.len() as u32 + 1),
        };
        self.categories.insert(key, category);
    }

    /// All types belonging to one category, in registration order.
    pub fn types_in_category(&self, category: &str) -> IndexMap<String, FieldTypeDef> {
        self.types
            .iter()
            .filter(|(_, def)| def.category == category)
            .map(|(key, def)| (key.clone(), def.clone()))
            .collect()
    }

    /// All categories with their member types, ordered ascending by each
    /// category's `order`. Types with an empty category key fall back to
    /// `BASIC`; types naming an unregistered category are omitted from the
    /// grouping.
    pub fn group_by_category(&self) -> IndexMap<String, CategoryGroup> {
        let mut grouped: IndexMap<String, CategoryGroup> = self
            .categories
            .iter()
            .map(|(key, category)| {
                (
                    key.clone(),
                    CategoryGroup {
                        label: category.label.clone(),
                        icon: category.icon.clone(),
                        order: category.order,
                        fields: IndexMap::new(),
                    },
                )
            })
            .collect();

        for (key, def) in &self.types {
            let category = if def.category.is_empty() {
                "BASIC"
            } else {
                def.category.as_str()
            };
            if let Some(group) = grouped.get_mut(category) {
                group.fields.insert(key.clone(), def.clone());
            }
        }

        grouped.sort_by(|_, a, _, b| a.order.cmp(&b.order));
        grouped
    }

    /// The default value for a type, `Null` when the key is unknown.
    pub fn default_value(&self, key: &str) -> Value {
        self.types
            .get(key)
            .map(|def| def.default_value.clone())
            .unwrap_or(Value::Null)
    }

    /// Default instance properties for a type: the stock style base plus the
    /// type's placeholder and its validation rules as behavioral attributes.
    /// Unknown keys get the bare style base.
    pub fn default_properties(&self, key: &str) -> serde_json::Map<String, Value> {
        let mut props = base_properties();
        let Some(def) = self.types.get(key) else {
            return props;
        };

        if !def.placeholder.is_empty() {
            props.insert("placeholder".into(), Value::String(def.placeholder.clone()));
        }
        let rules = &def.validation;
        if let Some(pattern) = &rules.pattern {
            props.insert("pattern".into(), Value::String(pattern.clone()));
        }
        if let Some(n) = rules.min_length {
            props.insert("minLength".into(), Value::from(n));
        }
        if let Some(n) = rules.max_length {
            props.insert("maxLength".into(), Value::from(n));
        }
        if let Some(n) = rules.min {
            props.insert("min".into(), Value::from(n));
        }
        if let Some(n) = rules.max {
            props.insert("max".into(), Value::from(n));
        }
        if let Some(n) = rules.step {
            props.insert("step".into(), Value::from(n));
        }
        if let Some(options) = &def.options {
            props.insert(
                "options".into(),
                serde_json::to_value(options).unwrap_or(Value::Array(Vec::new())),
            );
        }
        props
    }

    /// Build the seed for a new field instance of the given type, applying
    /// any caller overrides over the template.
    ///
    /// This is the registry's only failing operation: an unregistered key
    /// yields [`FieldsError::UnknownType`].
    pub fn instantiate(&self, key: &str, options: InstanceOptions) -> Result<FieldSeed> {
        let def = self
            .types
            .get(key)
            .ok_or_else(|| FieldsError::unknown_type(key))?;

        let mut properties = self.default_properties(key);
        for (name, value) in options.properties {
            properties.insert(name, value);
        }

        let mut validation = def.validation.clone();
        if let Some(overrides) = options.validation {
            if overrides.pattern.is_some() {
                validation.pattern = overrides.pattern;
            }
            if overrides.min_length.is_some() {
                validation.min_length = overrides.min_length;
            }
            if overrides.max_length.is_some() {
                validation.max_length = overrides.max_length;
            }
            if overrides.min.is_some() {
                validation.min = overrides.min;
            }
            if overrides.max.is_some() {
                validation.max = overrides.max;
            }
            if overrides.step.is_some() {
                validation.step = overrides.step;
            }
        }

        Ok(FieldSeed {
            field_type: key.to_string(),
            label: options.label.unwrap_or_else(|| def.label.clone()),
            default_value: options
                .default_value
                .unwrap_or_else(|| def.default_value.clone()),
            properties,
            validation,
            placeholder: options
                .placeholder
                .unwrap_or_else(|| def.placeholder.clone()),
        })
    }
}

impl Default for FieldTypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtins_are_seeded() {
        let registry = FieldTypeRegistry::with_builtins();
        assert!(registry.contains("text"));
        assert!(registry.contains("mobile"));
        assert!(registry.contains("datetime"));
        assert_eq!(registry.get("mobile").unwrap().label, "手机号码");
        assert!(registry.category("CONTACT").is_some());
    }

    #[test]
    fn get_unknown_returns_none() {
        let registry = FieldTypeRegistry::with_builtins();
        assert!(registry.get("starrating").is_none());
        assert!(!registry.contains("starrating"));
    }

    #[test]
    fn register_type_merges_defaults() {
        let mut registry = FieldTypeRegistry::with_builtins();
        registry.register_type("rating", TypePatch::new().label("评分"));

        let def = registry.get("rating").unwrap();
        assert_eq!(def.label, "评分");
        assert_eq!(def.category, "BASIC");
        assert_eq!(def.default_value, json!(""));
        assert!(def.validation.is_empty());
    }

    #[test]
    fn register_type_overwrites_last_writer_wins() {
        let mut registry = FieldTypeRegistry::with_builtins();
        registry.register_type("text", TypePatch::new().label("纯文本"));
        assert_eq!(registry.get("text").unwrap().label, "纯文本");
    }

    #[test]
    fn register_category_defaults_order_to_count_plus_one() {
        let mut registry = FieldTypeRegistry::with_builtins();
        registry.register_category("CUSTOM", CategoryPatch::new().label("自定义"));
        assert_eq!(registry.category("CUSTOM").unwrap().order, 6);

        registry.register_category("PINNED", CategoryPatch::new().label("置顶").order(0));
        assert_eq!(registry.category("PINNED").unwrap().order, 0);
    }

    #[test]
    fn group_by_category_orders_ascending() {
        let mut registry = FieldTypeRegistry::with_builtins();
        registry.register_category("PINNED", CategoryPatch::new().label("置顶").order(0));
        registry.register_type(
            "pinned_note",
            TypePatch::new().label("置顶说明").category("PINNED"),
        );

        let grouped = registry.group_by_category();
        let orders: Vec<u32> = grouped.values().map(|g| g.order).collect();
        let mut sorted = orders.clone();
        sorted.sort_unstable();
        assert_eq!(orders, sorted);
        assert_eq!(grouped.first().unwrap().0, "PINNED");
        assert!(grouped["PINNED"].fields.contains_key("pinned_note"));
        assert!(grouped["BASIC"].fields.contains_key("text"));
    }

    #[test]
    fn group_by_category_omits_unregistered_categories() {
        let mut registry = FieldTypeRegistry::with_builtins();
        registry.register_type(
            "orphan",
            TypePatch::new().label("孤儿").category("NO_SUCH_CATEGORY"),
        );
        let grouped = registry.group_by_category();
        assert!(grouped
            .values()
            .all(|group| !group.fields.contains_key("orphan")));
    }

    #[test]
    fn group_by_category_defaults_empty_category_to_basic() {
        let mut registry = FieldTypeRegistry::with_builtins();
        registry.register_type("untagged", TypePatch::new().label("未分类").category(""));
        let grouped = registry.group_by_category();
        assert!(grouped["BASIC"].fields.contains_key("untagged"));
    }

    #[test]
    fn types_in_category_filters() {
        let registry = FieldTypeRegistry::with_builtins();
        let contact = registry.types_in_category("CONTACT");
        assert!(contact.contains_key("mobile"));
        assert!(contact.contains_key("email"));
        assert!(!contact.contains_key("text"));
    }

    #[test]
    fn default_value_by_type() {
        let registry = FieldTypeRegistry::with_builtins();
        assert_eq!(registry.default_value("text"), json!(""));
        assert_eq!(registry.default_value("number"), Value::Null);
        assert_eq!(registry.default_value("checkbox"), json!([]));
        assert_eq!(registry.default_value("starrating"), Value::Null);
    }

    #[test]
    fn default_properties_carry_placeholder_and_rules() {
        let registry = FieldTypeRegistry::with_builtins();
        let props = registry.default_properties("password");
        assert_eq!(props["fontSize"], "14px");
        assert_eq!(props["required"], false);
        assert_eq!(props["placeholder"], "请输入密码");
        assert_eq!(props["minLength"], 6);
        assert_eq!(props["maxLength"], 20);
    }

    #[test]
    fn registered_choice_type_carries_options_into_properties() {
        use crate::types::ChoiceOption;

        let mut registry = FieldTypeRegistry::with_builtins();
        registry.register_type(
            "gender",
            TypePatch::new()
                .label("性别")
                .category("SELECTION")
                .options(vec![
                    ChoiceOption::new("male", "男"),
                    ChoiceOption::new("female", "女"),
                ]),
        );

        let props = registry.default_properties("gender");
        assert_eq!(
            props["options"],
            json!([
                {"value": "male", "label": "男"},
                {"value": "female", "label": "女"}
            ])
        );
    }

    #[test]
    fn instantiate_unknown_type_fails() {
        let registry = FieldTypeRegistry::with_builtins();
        let err = registry
            .instantiate("starrating", InstanceOptions::default())
            .unwrap_err();
        assert!(matches!(err, FieldsError::UnknownType { .. }));
    }

    #[test]
    fn instantiate_applies_overrides() {
        let registry = FieldTypeRegistry::with_builtins();
        let seed = registry
            .instantiate(
                "number",
                InstanceOptions {
                    label: Some("年龄".into()),
                    default_value: Some(json!(18)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(seed.field_type, "number");
        assert_eq!(seed.label, "年龄");
        assert_eq!(seed.default_value, json!(18));
        assert_eq!(seed.placeholder, "请输入数字");
    }
}
