//! Static per-type configuration and the model registry.
//!
//! Every ClickUp resource type is a [`ModelKind`]. Its [`Schema`] is a
//! `static` declared next to the type in `crate::models`, so paths, casts,
//! nested accessors and relations are all fixed at compile time.

use std::fmt;
use std::str::FromStr;

use heck::{ToLowerCamelCase, ToSnakeCase};

use crate::error::{ClickUpError, Result};
use crate::models;
use crate::support::attributes::Cast;
use crate::support::model::Model;
use crate::support::relations::Relation;

/// Every resource type the client knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelKind {
    Checklist,
    Comment,
    Field,
    Folder,
    Goal,
    Interval,
    Item,
    KeyResult,
    Member,
    Priority,
    Project,
    Share,
    Space,
    Status,
    Tag,
    Task,
    TaskList,
    TaskTemplate,
    Team,
    Time,
    User,
    View,
    Webhook,
}

/// Resources reachable straight from a parentless builder.
const ROOT_MODELS: &[(&str, ModelKind)] = &[
    ("spaces", ModelKind::Space),
    ("tasks", ModelKind::Task),
    ("teams", ModelKind::Team),
    ("workspaces", ModelKind::Team),
];

impl ModelKind {
    pub const ALL: [Self; 23] = [
        Self::Checklist,
        Self::Comment,
        Self::Field,
        Self::Folder,
        Self::Goal,
        Self::Interval,
        Self::Item,
        Self::KeyResult,
        Self::Member,
        Self::Priority,
        Self::Project,
        Self::Share,
        Self::Space,
        Self::Status,
        Self::Tag,
        Self::Task,
        Self::TaskList,
        Self::TaskTemplate,
        Self::Team,
        Self::Time,
        Self::User,
        Self::View,
        Self::Webhook,
    ];

    #[must_use]
    pub fn schema(self) -> &'static Schema {
        match self {
            Self::Checklist => &models::checklist::SCHEMA,
            Self::Comment => &models::comment::SCHEMA,
            Self::Field => &models::field::SCHEMA,
            Self::Folder => &models::folder::SCHEMA,
            Self::Goal => &models::goal::SCHEMA,
            Self::Interval => &models::interval::SCHEMA,
            Self::Item => &models::item::SCHEMA,
            Self::KeyResult => &models::key_result::SCHEMA,
            Self::Member => &models::member::SCHEMA,
            Self::Priority => &models::priority::SCHEMA,
            Self::Project => &models::project::SCHEMA,
            Self::Share => &models::share::SCHEMA,
            Self::Space => &models::space::SCHEMA,
            Self::Status => &models::status::SCHEMA,
            Self::Tag => &models::tag::SCHEMA,
            Self::Task => &models::task::SCHEMA,
            Self::TaskList => &models::task_list::SCHEMA,
            Self::TaskTemplate => &models::task_template::SCHEMA,
            Self::Team => &models::team::SCHEMA,
            Self::Time => &models::time::SCHEMA,
            Self::User => &models::user::SCHEMA,
            Self::View => &models::view::SCHEMA,
            Self::Webhook => &models::webhook::SCHEMA,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        self.schema().name
    }

    /// Look up a root resource name such as `"spaces"` or `"workspaces"`.
    #[must_use]
    pub fn root(name: &str) -> Option<Self> {
        ROOT_MODELS
            .iter()
            .find(|(root, _)| *root == name)
            .map(|(_, kind)| *kind)
    }

    /// Check every relation declaration in the registry.
    ///
    /// Each declaration is evaluated against a blank instance of its type, so
    /// relations pointing at types without a resource path are reported here
    /// instead of on first use. Declarations that depend on instance state
    /// (e.g. a view's `type`) are skipped.
    pub fn validate_registry() -> Result<()> {
        for kind in Self::ALL {
            let schema = kind.schema();

            for (i, relation) in schema.relations.iter().enumerate() {
                if schema.relations[..i].iter().any(|r| r.name == relation.name) {
                    return Err(ClickUpError::Configuration(format!(
                        "{kind} declares the relation [{}] twice",
                        relation.name
                    )));
                }
                if schema.field(relation.name).is_some() {
                    return Err(ClickUpError::Configuration(format!(
                        "{kind} declares [{}] as both a field and a relation",
                        relation.name
                    )));
                }

                match (relation.declare)(&Model::new(kind)) {
                    Ok(_) | Err(ClickUpError::InvalidRelationship(_)) => {}
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolve a type name; case, `_` and `-` are ignored.
impl FromStr for ModelKind {
    type Err = ClickUpError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalise(s);

        Self::ALL
            .into_iter()
            .find(|kind| normalise(kind.name()) == wanted)
            .ok_or_else(|| ClickUpError::UnknownModel(s.to_string()))
    }
}

fn normalise(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// How a field is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Raw value converted by a cast.
    Cast(Cast),
    /// Embedded object materialised into one model.
    One(ModelKind),
    /// Embedded array materialised into a collection.
    Many(ModelKind),
    /// Embedded array of single-key wrappers (`[{"user": {...}}]`),
    /// unwrapped before materialising.
    ManyUnwrapped(ModelKind),
}

/// A declared field of a model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn cast(name: &'static str, cast: Cast) -> Self {
        Self {
            name,
            kind: FieldKind::Cast(cast),
        }
    }

    pub const fn one(name: &'static str, kind: ModelKind) -> Self {
        Self {
            name,
            kind: FieldKind::One(kind),
        }
    }

    pub const fn many(name: &'static str, kind: ModelKind) -> Self {
        Self {
            name,
            kind: FieldKind::Many(kind),
        }
    }

    pub const fn many_unwrapped(name: &'static str, kind: ModelKind) -> Self {
        Self {
            name,
            kind: FieldKind::ManyUnwrapped(kind),
        }
    }
}

/// Builds a relation descriptor for a model instance.
///
/// `Ok(None)` means the relation does not apply to this instance's parent.
pub type DeclareRelation = fn(&Model) -> Result<Option<Relation>>;

/// A named relation of a model type.
#[derive(Clone, Copy)]
pub struct RelationDef {
    pub name: &'static str,
    pub declare: DeclareRelation,
}

impl RelationDef {
    pub const fn new(name: &'static str, declare: DeclareRelation) -> Self {
        Self { name, declare }
    }
}

impl fmt::Debug for RelationDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationDef").field("name", &self.name).finish()
    }
}

/// Static configuration shared by every instance of a model type.
#[derive(Debug)]
pub struct Schema {
    /// Type name, also the source of the default envelope keys.
    pub name: &'static str,
    /// Resource path, e.g. `/task`. Types only ever embedded in other
    /// resources have none.
    pub path: Option<&'static str>,
    pub primary_key: &'static str,
    /// Envelope key of a single resource, when not the default.
    pub response_key: Option<&'static str>,
    /// Envelope key of a resource collection, when not the default.
    pub response_collection_key: Option<&'static str>,
    /// Always addressed through the parent, even with an id.
    pub nested: bool,
    pub readonly: bool,
    pub fields: &'static [Field],
    pub relations: &'static [RelationDef],
}

impl Schema {
    /// Defaults for struct-update syntax in model declarations.
    pub const BASE: Self = Self {
        name: "",
        path: None,
        primary_key: "id",
        response_key: None,
        response_collection_key: None,
        nested: false,
        readonly: false,
        fields: &[],
        relations: &[],
    };

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn cast(&self, name: &str) -> Option<Cast> {
        self.field(name).and_then(|field| match field.kind {
            FieldKind::Cast(cast) => Some(cast),
            _ => None,
        })
    }

    #[must_use]
    pub fn relation(&self, name: &str) -> Option<&'static RelationDef> {
        self.relations.iter().find(|relation| relation.name == name)
    }

    /// Envelope key of a single resource (`{"task": {...}}`).
    #[must_use]
    pub fn response_key(&self) -> String {
        self.response_key
            .map_or_else(|| self.name.to_lower_camel_case(), str::to_string)
    }

    /// Envelope key of a collection (`{"tasks": [...]}`).
    #[must_use]
    pub fn response_collection_key(&self) -> String {
        self.response_collection_key
            .map_or_else(|| pluralize(&self.response_key()), str::to_string)
    }

    /// Attribute that holds the id of a record of this type on other records.
    #[must_use]
    pub fn foreign_key(&self) -> String {
        format!("{}_id", self.response_key().to_snake_case())
    }
}

/// English plural of an envelope key.
pub(crate) fn pluralize(word: &str) -> String {
    const UNCOUNTABLE: &[&str] = &["data", "information", "equipment"];

    if word.is_empty() || UNCOUNTABLE.contains(&word.to_lowercase().as_str()) {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{stem}ies");
        }
    }

    if ["s", "x", "z", "ch", "sh"].iter().any(|end| word.ends_with(end)) {
        return format!("{word}es");
    }

    format!("{word}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_consistent() {
        ModelKind::validate_registry().expect("registry should validate");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Task".parse::<ModelKind>().unwrap(), ModelKind::Task);
        assert_eq!("task_list".parse::<ModelKind>().unwrap(), ModelKind::TaskList);
        assert_eq!("TASKTEMPLATE".parse::<ModelKind>().unwrap(), ModelKind::TaskTemplate);
        assert!(matches!(
            "Some\\Unknown\\Class".parse::<ModelKind>(),
            Err(ClickUpError::UnknownModel(name)) if name == "Some\\Unknown\\Class"
        ));
    }

    #[test]
    fn test_roots() {
        assert_eq!(ModelKind::root("spaces"), Some(ModelKind::Space));
        assert_eq!(ModelKind::root("workspaces"), Some(ModelKind::Team));
        assert_eq!(ModelKind::root("folders"), None);
    }

    #[test]
    fn test_default_envelope_keys() {
        let task = ModelKind::Task.schema();
        assert_eq!(task.response_key(), "task");
        assert_eq!(task.response_collection_key(), "tasks");

        assert_eq!(ModelKind::Status.schema().response_collection_key(), "statuses");
        assert_eq!(ModelKind::Priority.schema().response_collection_key(), "priorities");
    }

    #[test]
    fn test_overridden_envelope_keys() {
        let list = ModelKind::TaskList.schema();
        assert_eq!(list.response_key(), "list");
        assert_eq!(list.response_collection_key(), "lists");

        let template = ModelKind::TaskTemplate.schema();
        assert_eq!(template.response_key(), "taskTemplate");
        assert_eq!(template.response_collection_key(), "templates");

        let time = ModelKind::Time.schema();
        assert_eq!(time.response_key(), "data");
        assert_eq!(time.response_collection_key(), "data");
    }

    #[test]
    fn test_foreign_keys() {
        assert_eq!(ModelKind::TaskList.schema().foreign_key(), "list_id");
        assert_eq!(ModelKind::Folder.schema().foreign_key(), "folder_id");
        assert_eq!(ModelKind::TaskTemplate.schema().foreign_key(), "task_template_id");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("key"), "keys");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("data"), "data");
        assert_eq!(pluralize("taskTemplate"), "taskTemplates");
    }

    #[test]
    fn test_schema_lookups() {
        let task = ModelKind::Task.schema();
        assert!(matches!(task.cast("archived"), Some(Cast::Boolean)));
        assert!(task.cast("assignees").is_none());
        assert!(task.field("assignees").is_some());
        assert!(task.relation("comments").is_some());
        assert!(task.relation("nope").is_none());
    }
}
