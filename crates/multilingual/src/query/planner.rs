use super::lookup::{Lookup, Operand, LOOKUP_SEP};
use crate::{Error, Result};

use multilingual_core::{
    language::{field_alias, table_alias},
    schema::{Model, TranslationModel},
    stmt::{Expr, Select, SelectItem},
    LanguageCode, Languages,
};

use std::collections::{HashMap, HashSet};

/// Rewrites field references of one query into columns of the owner table
/// or of language-specific joins of the translation table.
///
/// Every language gets its own join, aliased by [`table_alias`]. All
/// references to the same language share that join; references to different
/// languages never do. Joins are always left joins, so owners without a row
/// in some language stay in the result.
#[derive(Debug)]
pub(crate) struct Planner<'a> {
    model: &'a Model,
    languages: &'a Languages,

    /// Stands in for the active language in unsuffixed references
    language: Option<&'a LanguageCode>,

    pub(crate) select: Select,

    /// Eager-loaded languages and the position of their first extra column
    pub(crate) eager: Vec<(LanguageCode, usize)>,
}

impl<'a> Planner<'a> {
    pub(crate) fn new(
        model: &'a Model,
        languages: &'a Languages,
        language: Option<&'a LanguageCode>,
    ) -> Planner<'a> {
        Planner {
            model,
            languages,
            language,
            select: Select::new(&model.table),
            eager: vec![],
        }
    }

    /// Projects the owner's fields, in model order.
    pub(crate) fn project_model(&mut self) {
        let alias = self.select.alias.clone();

        for field in &self.model.fields {
            self.select.returning.push(SelectItem {
                expr: Expr::column(&alias, &field.name),
                alias: None,
            });
        }
    }

    /// Compiles `path <lookup> operand` where the path may end in a lookup
    /// (`title_en__startswith`).
    ///
    /// A negated condition is true when the referenced value is null, so an
    /// exclusion keeps owners without a row in the referenced language.
    pub(crate) fn condition(
        &mut self,
        path: &str,
        operand: Operand,
        negate: bool,
    ) -> Result<Expr> {
        let (field_path, lookup) = match path.rsplit_once(LOOKUP_SEP) {
            Some((head, tail)) => match Lookup::from_name(tail) {
                Some(lookup) => (head, lookup),
                None => (path, Lookup::Exact),
            },
            None => (path, Lookup::Exact),
        };

        let lhs = self.field_expr(field_path)?;
        let expr = lookup.apply(lhs.clone(), operand)?;

        if !negate {
            return Ok(expr);
        }

        Ok(match expr {
            expr @ Expr::IsNull { .. } => Expr::not(expr),
            expr => Expr::not(Expr::and(expr, Expr::is_not_null(lhs))),
        })
    }

    /// Compiles a field path without a lookup.
    pub(crate) fn field_expr(&mut self, path: &str) -> Result<Expr> {
        match path.split_once(LOOKUP_SEP) {
            None => self.reference(path),
            Some((first, _)) if self.model.proxy(first).is_some() => {
                Err(Error::unsupported_query(format!(
                    "`{path}` traverses translated field `{first}` of `{}`; relations \
                     through translated fields are not supported",
                    self.model.name
                )))
            }
            Some(_) => Err(Error::unsupported_query(format!(
                "`{path}` does not name a field of `{}`",
                self.model.name
            ))),
        }
    }

    /// Resolves a field or proxy name to a column expression.
    ///
    /// Fallback proxies resolve to the first non-null value over the joins of
    /// the language and its fallback chain.
    fn reference(&mut self, name: &str) -> Result<Expr> {
        let model = self.model;

        let name = if name == "pk" {
            &model.primary_key().name[..]
        } else {
            name
        };

        if model.field(name).is_some() {
            return Ok(Expr::column(&self.select.alias, name));
        }

        let Some(proxy) = model.proxy(name) else {
            return Err(Error::unsupported_query(format!(
                "`{name}` does not name a field of `{}`",
                model.name
            )));
        };

        let language = proxy.language_or(self.language, self.languages);
        let field = proxy.field().to_string();

        if !proxy.fallback() {
            let alias = self.translation_join(&language)?;
            return Ok(Expr::column(alias, field));
        }

        let mut chain = vec![language.clone()];
        chain.extend(self.languages.fallback_chain(&language));

        let columns = chain
            .iter()
            .map(|code| -> Result<Expr> {
                Ok(Expr::column(self.translation_join(code)?, &field))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Expr::coalesce(columns))
    }

    /// Left-joins the translation table for `language`, reusing the join
    /// already made for it. Returns the join's alias.
    pub(crate) fn translation_join(&mut self, language: &LanguageCode) -> Result<String> {
        let translation = self.translation_model()?;
        let table = translation.table.clone();
        let target = table_alias(&table, language);

        // Joins made for other languages are never shared
        let exclusions: HashSet<String> = self
            .select
            .aliases_of(&table)
            .filter(|alias| *alias != target)
            .map(str::to_string)
            .collect();
        let reuse = HashSet::from([target.clone()]);

        let owner = self.select.alias.clone();
        let pk = self.model.primary_key().name.clone();

        let alias = self.select.join(&table, &reuse, &exclusions, |alias| {
            Expr::and(
                Expr::eq(
                    Expr::column(&owner, &pk),
                    Expr::column(alias, TranslationModel::MASTER_ID),
                ),
                Expr::eq(
                    Expr::column(alias, TranslationModel::LANGUAGE_CODE),
                    Expr::value(language.as_str()),
                ),
            )
        });

        if alias == target {
            tracing::debug!(alias = %target, "translation join reused");
        } else {
            self.select
                .change_aliases(&HashMap::from([(alias, target.clone())]));
            tracing::debug!(alias = %target, language = %language, "translation join created");
        }

        Ok(target)
    }

    /// Eager-loads translation rows: `<related_name>` for the active language,
    /// `<related_name>_<lang>` for a specific one.
    pub(crate) fn select_related(&mut self, name: &str) -> Result<()> {
        let translation = self.translation_model()?;
        let related_name = &translation.related_name;

        let language = if name == related_name.as_str() {
            self.language
                .cloned()
                .unwrap_or_else(|| self.languages.active_language())
        } else {
            let Some(suffix) = name
                .strip_prefix(related_name.as_str())
                .and_then(|rest| rest.strip_prefix('_'))
            else {
                return Err(Error::unsupported_query(format!(
                    "`{name}` is not a translation relation of `{}`; expected `{related_name}` \
                     or `{related_name}_<language>`",
                    self.model.name
                )));
            };

            self.languages
                .configured()
                .find(|code| code.sanitized() == suffix)
                .cloned()
                .ok_or_else(|| Error::invalid_language(suffix))?
        };

        if self.eager.iter().any(|(code, _)| *code == language) {
            return Ok(());
        }

        let fields: Vec<String> = translation
            .translated_fields()
            .iter()
            .map(|field| field.name.clone())
            .collect();

        let alias = self.translation_join(&language)?;
        let start = self.select.returning.len();

        for column in std::iter::once(TranslationModel::ID).chain(fields.iter().map(|f| &f[..])) {
            self.select.returning.push(SelectItem {
                expr: Expr::column(&alias, column),
                alias: Some(field_alias(column, &language)),
            });
        }

        self.eager.push((language, start));
        Ok(())
    }

    fn translation_model(&self) -> Result<&'a TranslationModel> {
        self.model.translation.as_ref().ok_or_else(|| {
            Error::unsupported_query(format!(
                "`{}` has no translated fields",
                self.model.name
            ))
        })
    }
}
