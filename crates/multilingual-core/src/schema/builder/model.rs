use crate::{
    schema::{Field, Manager, Model, ModelId, ProxyTable, TranslationModel},
    Error, Languages, Result,
};

use heck::ToSnakeCase;

/// Declares an owner model and its translated fields.
///
/// Building the model produces the companion translation model, the proxy
/// accessor table and the manager check in one step.
///
/// ```
/// # use multilingual_core::schema::{Field, ModelBuilder};
/// let article = ModelBuilder::new("Article")
///     .field(Field::string("slug").unique())
///     .translated(Field::string("title").unique())
///     .translated(Field::string("body").nullable());
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    name: String,
    table: Option<String>,
    fields: Vec<Field>,
    unique_together: Vec<Vec<String>>,
    translated: Vec<Field>,
    translated_unique_together: Vec<Vec<String>>,
    related_name: Option<String>,
    manager: Manager,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> ModelBuilder {
        ModelBuilder {
            name: name.into(),
            table: None,
            fields: vec![],
            unique_together: vec![],
            translated: vec![],
            translated_unique_together: vec![],
            related_name: None,
            manager: Manager::default(),
        }
    }

    /// Table name. Defaults to the snake-cased model name.
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Adds a language-independent field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn unique_together(mut self, fields: &[&str]) -> Self {
        self.unique_together
            .push(fields.iter().map(|name| name.to_string()).collect());
        self
    }

    /// Adds a translated field, stored per language in the translation table.
    pub fn translated(mut self, field: Field) -> Self {
        self.translated.push(field);
        self
    }

    /// Unique constraint over translated fields. It is enforced per language.
    pub fn translated_unique_together(mut self, fields: &[&str]) -> Self {
        self.translated_unique_together
            .push(fields.iter().map(|name| name.to_string()).collect());
        self
    }

    /// Name of the reverse relation to translations. Defaults to
    /// `translations`.
    pub fn related_name(mut self, name: impl Into<String>) -> Self {
        self.related_name = Some(name.into());
        self
    }

    pub fn manager(mut self, manager: Manager) -> Self {
        self.manager = manager;
        self
    }

    pub(crate) fn build(
        &self,
        id: ModelId,
        languages: &Languages,
        prefix: Option<&str>,
    ) -> Result<Model> {
        let table = format!(
            "{}{}",
            prefix.unwrap_or(""),
            self.table
                .clone()
                .unwrap_or_else(|| self.name.to_snake_case())
        );

        let mut fields = vec![Field::primary_key("id")];
        for field in &self.fields {
            if fields.iter().any(|f| f.name == field.name) {
                return Err(Error::configuration(format!(
                    "model `{}` declares field `{}` more than once",
                    self.name, field.name
                )));
            }
            fields.push(field.clone());
        }

        let (translation, proxies) = if self.translated.is_empty() {
            (None, ProxyTable::default())
        } else {
            if let Manager::Custom {
                name,
                multilingual: false,
            } = &self.manager
            {
                return Err(Error::configuration(format!(
                    "model `{}` has translated fields, so its record manager must be \
                     multilingual-aware; `{}` is not",
                    self.name, name
                )));
            }

            let translation = self.build_translation(&table)?;
            let proxies = ProxyTable::build(
                translation.translated_fields().iter().map(|f| &f.name[..]),
                languages,
            )
            .map_err(|err| err.context(crate::err!("model `{}`", self.name)))?;

            if let Some(field) = fields.iter().find(|f| proxies.contains(&f.name)) {
                return Err(Error::configuration(format!(
                    "field `{}` of model `{}` collides with a translated field accessor",
                    field.name, self.name
                )));
            }

            (Some(translation), proxies)
        };

        Ok(Model {
            id,
            name: self.name.clone(),
            table,
            fields,
            unique_together: self.unique_together.clone(),
            translation,
            proxies,
            manager: self.manager.clone(),
        })
    }

    fn build_translation(&self, owner_table: &str) -> Result<TranslationModel> {
        let mut fields = vec![
            Field::primary_key(TranslationModel::ID),
            Field::string(TranslationModel::LANGUAGE_CODE),
            Field::i64(TranslationModel::MASTER_ID),
        ];

        let mut unique_together: Vec<Vec<String>> = vec![];

        for field in &self.translated {
            if TranslationModel::is_system_field(&field.name)
                || fields.iter().any(|f| f.name == field.name)
            {
                return Err(Error::configuration(format!(
                    "translated field `{}` of model `{}` is reserved or declared twice",
                    field.name, self.name
                )));
            }

            // Uniqueness of a translated field only holds within one language
            if field.unique {
                unique_together.push(vec![
                    field.name.clone(),
                    TranslationModel::LANGUAGE_CODE.to_string(),
                ]);
            }

            fields.push(Field {
                unique: false,
                ..field.clone()
            });
        }

        for group in &self.translated_unique_together {
            if let Some(name) = group
                .iter()
                .find(|name| !self.translated.iter().any(|f| &&f.name == name))
            {
                return Err(Error::configuration(format!(
                    "unique constraint of model `{}` references unknown translated field `{}`",
                    self.name, name
                )));
            }

            let mut group = group.clone();
            group.push(TranslationModel::LANGUAGE_CODE.to_string());
            unique_together.push(group);
        }

        unique_together.push(vec![
            TranslationModel::LANGUAGE_CODE.to_string(),
            TranslationModel::MASTER_ID.to_string(),
        ]);

        Ok(TranslationModel {
            name: format!("{}Translation", self.name),
            table: format!("{}_translation", owner_table),
            related_name: self
                .related_name
                .clone()
                .unwrap_or_else(|| "translations".to_string()),
            fields,
            unique_together,
        })
    }
}
