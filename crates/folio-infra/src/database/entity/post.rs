//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use folio_core::domain::{Post, PostDocument, PostPatch};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub author: String,
    pub date: DateTimeWithTimeZone,
    pub image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn tags_to_json(tags: Vec<String>) -> Json {
    Json::Array(tags.into_iter().map(Json::String).collect())
}

/// Conversion from SeaORM Model to Domain Post.
///
/// The column is schemaless JSON; anything that is not a string array
/// entry is skipped.
impl From<Model> for Post {
    fn from(model: Model) -> Self {
        let tags = model
            .tags
            .as_array()
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: model.id,
            title: model.title,
            excerpt: model.excerpt,
            content: model.content,
            category: model.category,
            tags,
            author: model.author,
            date: model.date.into(),
            image: model.image,
        }
    }
}

/// New row for an inserted document.
pub fn new_row(id: String, document: PostDocument) -> ActiveModel {
    ActiveModel {
        id: Set(id),
        title: Set(document.title),
        excerpt: Set(document.excerpt),
        content: Set(document.content),
        category: Set(document.category),
        tags: Set(tags_to_json(document.tags)),
        author: Set(document.author),
        date: Set(document.date.into()),
        image: Set(document.image),
    }
}

/// Partial row for an edit: `id` and `author` stay `NotSet`, `date` too
/// unless the patch carries one.
impl From<PostPatch> for ActiveModel {
    fn from(patch: PostPatch) -> Self {
        let mut model = Self {
            title: Set(patch.title),
            excerpt: Set(patch.excerpt),
            content: Set(patch.content),
            category: Set(patch.category),
            tags: Set(tags_to_json(patch.tags)),
            image: Set(patch.image),
            ..Default::default()
        };
        if let Some(date) = patch.date {
            model.date = Set(date.into());
        }
        model
    }
}
