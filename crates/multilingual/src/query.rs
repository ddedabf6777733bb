//! The record manager: filter, exclude, order and fetch owner records by
//! language-independent fields and translated fields alike.

mod lookup;
use lookup::{Operand, LOOKUP_SEP};

mod planner;
use planner::Planner;

use crate::{err, record::Translation, Db, Error, Record, Result};

use multilingual_core::{
    schema::{Model, TranslationModel},
    stmt::{Delete, Direction, Expr, OrderByExpr, Select, SelectItem, Type, Value},
    LanguageCode,
};

use indexmap::IndexMap;
use std::sync::Arc;

/// A lazily evaluated query over one model.
///
/// Building a query performs no I/O. Paths are resolved when a terminal
/// method runs; unknown fields, unsupported traversals and unconfigured
/// languages fail then, before anything is sent to the store. Unsuffixed
/// translated names resolve to the active language at that point.
#[derive(Debug, Clone)]
pub struct Query {
    db: Db,
    model: Arc<Model>,
    conditions: Vec<Condition>,
    order_by: Vec<String>,
    select_related: Vec<String>,
    language: Option<String>,
    limit: Option<u64>,
}

#[derive(Debug, Clone)]
struct Condition {
    path: String,
    operand: Operand,
    negate: bool,
}

enum Projection<'a> {
    Records,
    Fields(&'a [&'a str]),
    Count,
    Ids,
}

impl Query {
    pub(crate) fn new(db: Db, model: Arc<Model>) -> Query {
        Query {
            db,
            model,
            conditions: vec![],
            order_by: vec![],
            select_related: vec![],
            language: None,
            limit: None,
        }
    }

    pub fn model(&self) -> &Arc<Model> {
        &self.model
    }

    /// Keeps records where `path` matches `value`.
    ///
    /// The path is a field or proxy name, optionally followed by a lookup:
    /// `slug`, `title`, `title_en__startswith`, `title_any__isnull`.
    pub fn filter(mut self, path: &str, value: impl Into<Value>) -> Query {
        self.conditions.push(Condition {
            path: path.to_string(),
            operand: Operand::Value(value.into()),
            negate: false,
        });
        self
    }

    /// Keeps records where `path` is one of `values`.
    pub fn filter_in<V: Into<Value>>(
        mut self,
        path: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Query {
        self.conditions.push(Condition {
            path: format!("{path}{LOOKUP_SEP}in"),
            operand: Operand::List(values.into_iter().map(Into::into).collect()),
            negate: false,
        });
        self
    }

    /// Drops records where `path` matches `value`.
    ///
    /// A record whose value is null, including one without a translation
    /// row in the referenced language, never matches and is kept.
    pub fn exclude(mut self, path: &str, value: impl Into<Value>) -> Query {
        self.conditions.push(Condition {
            path: path.to_string(),
            operand: Operand::Value(value.into()),
            negate: true,
        });
        self
    }

    /// Orders by `path`; a leading `-` sorts descending.
    pub fn order_by(mut self, path: &str) -> Query {
        self.order_by.push(path.to_string());
        self
    }

    /// Loads translation rows with the records: `translations` for the
    /// active language, `translations_<lang>` for a specific one.
    pub fn select_related(mut self, name: &str) -> Query {
        self.select_related.push(name.to_string());
        self
    }

    /// Resolves unsuffixed translated names in `language` instead of the
    /// active language.
    pub fn for_language(mut self, language: &str) -> Query {
        self.language = Some(language.to_string());
        self
    }

    pub fn limit(mut self, limit: u64) -> Query {
        self.limit = Some(limit);
        self
    }

    pub async fn all(&self) -> Result<Vec<Record>> {
        let (select, eager) = self.compile(Projection::Records)?;
        let rows = self.db.exec(select.into()).await?.into_values();

        let languages = self.db.languages();
        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            let mut record =
                Record::from_row(self.model.clone(), languages.clone(), row.iter().cloned())?;

            if !eager.is_empty() {
                self.fill_cache(&mut record, &row, &eager)?;
            }

            records.push(record);
        }

        Ok(records)
    }

    pub async fn first(&self) -> Result<Option<Record>> {
        let records = self.clone().limit(1).all().await?;
        Ok(records.into_iter().next())
    }

    /// Returns the only matching record.
    pub async fn get(&self) -> Result<Record> {
        let mut records = self.clone().limit(2).all().await?.into_iter();

        match (records.next(), records.next()) {
            (Some(record), None) => Ok(record),
            (None, _) => Err(Error::record_not_found(format!(
                "no `{}` matches the query",
                self.model.name
            ))),
            (Some(_), Some(_)) => Err(Error::too_many_records(format!(
                "more than one `{}` matches the query",
                self.model.name
            ))),
        }
    }

    pub async fn count(&self) -> Result<u64> {
        let (select, _) = self.compile(Projection::Count)?;
        let rows = self.db.exec(select.into()).await?.into_values();

        rows.first()
            .and_then(|row| row.first())
            .and_then(Value::as_i64)
            .map(|count| count as u64)
            .ok_or_else(|| err!("count query returned no rows"))
    }

    pub async fn exists(&self) -> Result<bool> {
        let (select, _) = self.clone().limit(1).compile(Projection::Ids)?;
        let rows = self.db.exec(select.into()).await?.into_values();
        Ok(!rows.is_empty())
    }

    /// Selected fields of each matching record, keyed by the requested names.
    pub async fn values(&self, fields: &[&str]) -> Result<Vec<IndexMap<String, Value>>> {
        let rows = self.values_list(fields).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                fields
                    .iter()
                    .map(|name| name.to_string())
                    .zip(row)
                    .collect()
            })
            .collect())
    }

    /// Selected fields of each matching record, in the requested order.
    pub async fn values_list(&self, fields: &[&str]) -> Result<Vec<Vec<Value>>> {
        let (select, _) = self.compile(Projection::Fields(fields))?;
        let rows = self.db.exec(select.into()).await?.into_values();

        let types: Vec<Option<Type>> = fields.iter().map(|name| self.field_type(name)).collect();

        rows.into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&types)
                    .map(|(value, ty)| match ty {
                        Some(ty) => value.cast(*ty),
                        None => Ok(value),
                    })
                    .collect()
            })
            .collect()
    }

    /// Deletes the matching records and their translation rows. Returns the
    /// number of records deleted.
    pub async fn delete(&self) -> Result<u64> {
        let (select, _) = self.compile(Projection::Ids)?;
        let ids: Vec<Value> = self
            .db
            .exec(select.into())
            .await?
            .into_values()
            .into_iter()
            .filter_map(|row| row.into_iter().next())
            .collect();

        if ids.is_empty() {
            return Ok(0);
        }

        if let Some(translation) = &self.model.translation {
            self.db
                .exec(
                    Delete {
                        table: translation.table.clone(),
                        filter: Some(Expr::in_list(
                            Expr::column(&translation.table, TranslationModel::MASTER_ID),
                            ids.clone(),
                        )),
                    }
                    .into(),
                )
                .await?;
        }

        let response = self
            .db
            .exec(
                Delete {
                    table: self.model.table.clone(),
                    filter: Some(Expr::in_list(
                        Expr::column(&self.model.table, &self.model.primary_key().name),
                        ids,
                    )),
                }
                .into(),
            )
            .await?;

        Ok(response.count_affected())
    }

    /// Creates and saves a record from field and proxy values.
    pub async fn create<'a>(
        &self,
        values: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Result<Record> {
        let mut record = Record::new(self.model.clone(), self.db.languages().clone());

        for (name, value) in values {
            record.set(&self.db, name, value).await?;
        }

        record.save(&self.db).await?;
        Ok(record)
    }

    /// Returns the record matching `lookup`, creating it from `lookup` and
    /// `defaults` when there is none. The flag is `true` when the record was
    /// created.
    pub async fn get_or_create<'a>(
        &self,
        lookup: &[(&'a str, Value)],
        defaults: impl IntoIterator<Item = (&'a str, Value)>,
    ) -> Result<(Record, bool)> {
        let query = lookup
            .iter()
            .fold(self.clone(), |query, (path, value)| {
                query.filter(path, value.clone())
            });

        match query.get().await {
            Ok(record) => return Ok((record, false)),
            Err(err) if err.is_record_not_found() => {}
            Err(err) => return Err(err),
        }

        // Lookups such as `title__startswith` do not describe a value
        let values = lookup
            .iter()
            .filter(|(path, _)| !path.contains(LOOKUP_SEP))
            .cloned()
            .chain(defaults);

        let record = self.create(values).await?;
        Ok((record, true))
    }

    fn compile(&self, projection: Projection<'_>) -> Result<(Select, Vec<(LanguageCode, usize)>)> {
        let languages = self.db.languages();

        let language = self
            .language
            .as_deref()
            .map(|code| languages.validate(code))
            .transpose()?;

        let mut planner = Planner::new(&self.model, languages, language.as_ref());
        let is_count = matches!(projection, Projection::Count);

        match projection {
            Projection::Records => {
                planner.project_model();

                for name in &self.select_related {
                    planner.select_related(name)?;
                }
            }
            Projection::Fields(fields) => {
                for name in fields {
                    let expr = planner.field_expr(name)?;
                    planner.select.returning.push(SelectItem {
                        expr,
                        alias: Some(name.to_string()),
                    });
                }
            }
            Projection::Count => {
                planner.select.returning.push(SelectItem {
                    expr: Expr::CountStar,
                    alias: None,
                });
            }
            Projection::Ids => {
                let expr = planner.field_expr("pk")?;
                planner.select.returning.push(SelectItem { expr, alias: None });
            }
        }

        for condition in &self.conditions {
            let expr = planner
                .condition(&condition.path, condition.operand.clone(), condition.negate)
                .map_err(|e| e.context(err!("{}.filter({})", self.model.name, condition.path)))?;
            planner.select.add_filter(expr);
        }

        for path in &self.order_by {
            let (path, direction) = match path.strip_prefix('-') {
                Some(path) => (path, Direction::Desc),
                None => (&path[..], Direction::Asc),
            };

            let expr = planner.field_expr(path)?;
            planner.select.order_by.push(OrderByExpr { expr, direction });
        }

        // Counting ignores the limit
        if !is_count {
            planner.select.limit = self.limit;
        }

        let Planner { select, eager, .. } = planner;
        Ok((select, eager))
    }

    /// Pre-fills the record's translation cache from eager-loaded columns.
    ///
    /// A null translation id means the owner has no row in that language,
    /// which is cached as absent.
    fn fill_cache(
        &self,
        record: &mut Record,
        row: &[Value],
        eager: &[(LanguageCode, usize)],
    ) -> Result<()> {
        let Some(translation_model) = &self.model.translation else {
            return Ok(());
        };

        let owner = record
            .id()
            .ok_or_else(|| err!("eager-loaded `{}` row without an id", self.model.name))?;
        let width = translation_model.translated_fields().len();

        for (language, start) in eager {
            let translation = match row[*start].as_i64() {
                Some(id) => Some(Translation::loaded(
                    id,
                    language.clone(),
                    owner,
                    translation_model,
                    row[start + 1..start + 1 + width].iter().cloned(),
                )?),
                None => None,
            };

            tracing::debug!(
                model = %self.model.name,
                id = owner,
                language = %language,
                present = translation.is_some(),
                "translation cache filled from eager load"
            );

            record.cache_mut().fill(language.clone(), translation);
        }

        Ok(())
    }

    fn field_type(&self, name: &str) -> Option<Type> {
        let name = if name == "pk" {
            &self.model.primary_key().name[..]
        } else {
            name
        };

        if let Some(field) = self.model.field(name) {
            return Some(field.ty);
        }

        let proxy = self.model.proxy(name)?;
        self.model
            .translation
            .as_ref()?
            .translated_field(proxy.field())
            .map(|field| field.ty)
    }
}
