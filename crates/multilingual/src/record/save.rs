use super::Record;
use crate::{err, Db, Result};

use multilingual_core::{
    schema::TranslationModel,
    stmt::{Delete, Expr, Insert, Statement, Update, Value},
};

impl Record {
    /// Persists the record, then every translation row in its cache.
    ///
    /// The owner is written first so new rows can reference its id. Languages
    /// cached as absent produce no writes. A failing translation row is
    /// reported with the language it belongs to; the owner stays persisted.
    pub async fn save(&mut self, db: &Db) -> Result<()> {
        let id = self.save_owner(db).await?;
        let model = self.model.clone();

        let Some(translation_model) = &model.translation else {
            return Ok(());
        };

        for translation in self.cache_mut().rows_mut() {
            translation.set_master_id(id);

            let stmt: Statement = match translation.id() {
                None => Insert {
                    table: translation_model.table.clone(),
                    columns: [TranslationModel::LANGUAGE_CODE, TranslationModel::MASTER_ID]
                        .into_iter()
                        .map(String::from)
                        .chain(translation.values().map(|(name, _)| name.to_string()))
                        .collect(),
                    values: [Value::from(translation.language().as_str()), Value::from(id)]
                        .into_iter()
                        .chain(translation.values().map(|(_, value)| value.clone()))
                        .collect(),
                    returning: Some(TranslationModel::ID.to_string()),
                }
                .into(),
                Some(translation_id) => Update {
                    table: translation_model.table.clone(),
                    assignments: std::iter::once((
                        TranslationModel::MASTER_ID.to_string(),
                        Value::from(id),
                    ))
                    .chain(
                        translation
                            .values()
                            .map(|(name, value)| (name.to_string(), value.clone())),
                    )
                    .collect(),
                    filter: Expr::eq(
                        Expr::column(&translation_model.table, TranslationModel::ID),
                        Expr::value(translation_id),
                    ),
                }
                .into(),
            };

            tracing::debug!(
                model = %model.name,
                owner = id,
                language = %translation.language(),
                insert = stmt.is_insert(),
                "saving translation"
            );

            let response = db.exec(stmt).await.map_err(|e| {
                e.context(err!(
                    "saving `{}` translation of {} {}",
                    translation.language(),
                    model.name,
                    id
                ))
            })?;

            let translation_id = match translation.id() {
                Some(translation_id) => translation_id,
                None => returned_id(response.into_values())?,
            };

            translation.persisted(translation_id, id);
        }

        Ok(())
    }

    /// Inserts or updates the owner row and returns its id.
    async fn save_owner(&mut self, db: &Db) -> Result<i64> {
        let model = self.model.clone();
        let fields = model.fields.iter().zip(self.values()).skip(1);

        match self.id() {
            Some(id) => {
                let assignments: Vec<_> = fields
                    .map(|(field, value)| (field.name.clone(), value.clone()))
                    .collect();

                // Nothing but the key to write
                if !assignments.is_empty() {
                    let update = Update {
                        table: model.table.clone(),
                        assignments,
                        filter: Expr::eq(
                            Expr::column(&model.table, &model.primary_key().name),
                            Expr::value(id),
                        ),
                    };
                    db.exec(update.into()).await?;
                }

                Ok(id)
            }
            None => {
                let (columns, values) = fields
                    .map(|(field, value)| (field.name.clone(), value.clone()))
                    .unzip();

                let insert = Insert {
                    table: model.table.clone(),
                    columns,
                    values,
                    returning: Some(model.primary_key().name.clone()),
                };

                let id = returned_id(db.exec(insert.into()).await?.into_values())?;
                self.set_id(Some(id));

                tracing::debug!(model = %model.name, id, "owner inserted");
                Ok(id)
            }
        }
    }

    /// Deletes the record and its translation rows.
    pub async fn delete(&mut self, db: &Db) -> Result<()> {
        let Some(id) = self.id() else {
            return Err(err!("cannot delete an unsaved {}", self.model.name));
        };

        let model = self.model.clone();

        if let Some(translation_model) = &model.translation {
            db.exec(
                Delete {
                    table: translation_model.table.clone(),
                    filter: Some(Expr::eq(
                        Expr::column(&translation_model.table, TranslationModel::MASTER_ID),
                        Expr::value(id),
                    )),
                }
                .into(),
            )
            .await?;
        }

        db.exec(
            Delete {
                table: model.table.clone(),
                filter: Some(Expr::eq(
                    Expr::column(&model.table, &model.primary_key().name),
                    Expr::value(id),
                )),
            }
            .into(),
        )
        .await?;

        self.set_id(None);
        self.cache_mut().clear();
        Ok(())
    }
}

fn returned_id(rows: Vec<Vec<Value>>) -> Result<i64> {
    rows.into_iter()
        .next()
        .and_then(|row| row.into_iter().next())
        .and_then(|value| value.as_i64())
        .ok_or_else(|| err!("insert did not return an id"))
}
