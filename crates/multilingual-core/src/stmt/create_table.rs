use super::Type;
use crate::schema::{Field, Model, TranslationModel};

#[derive(Debug, Clone)]
pub struct CreateTable {
    pub table: String,
    pub columns: Vec<ColumnDef>,
    pub unique: Vec<Vec<String>>,
    pub foreign_keys: Vec<ForeignKey>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: Type,
    pub not_null: bool,
    pub primary_key: bool,
    pub unique: bool,
}

/// A single-column foreign key that cascades deletes.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub column: String,
    pub references: String,
    pub referenced_column: String,
}

impl From<&Field> for ColumnDef {
    fn from(field: &Field) -> Self {
        ColumnDef {
            name: field.name.clone(),
            ty: field.ty,
            not_null: !field.nullable,
            primary_key: field.primary_key,
            unique: field.unique,
        }
    }
}

impl CreateTable {
    /// The owner table of `model`.
    pub fn for_model(model: &Model) -> CreateTable {
        CreateTable {
            table: model.table.clone(),
            columns: model.fields.iter().map(ColumnDef::from).collect(),
            unique: model.unique_together.clone(),
            foreign_keys: vec![],
        }
    }

    /// The translation table of `model`, if it has one.
    pub fn for_translation(model: &Model) -> Option<CreateTable> {
        let translation = model.translation.as_ref()?;

        Some(CreateTable {
            table: translation.table.clone(),
            columns: translation.fields.iter().map(ColumnDef::from).collect(),
            unique: translation.unique_together.clone(),
            foreign_keys: vec![ForeignKey {
                column: TranslationModel::MASTER_ID.to_string(),
                references: model.table.clone(),
                referenced_column: model.primary_key().name.clone(),
            }],
        })
    }
}
