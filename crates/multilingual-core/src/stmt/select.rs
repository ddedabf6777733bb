use super::{Expr, ExprColumn, Join, JoinOp, OrderByExpr};

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct Select {
    /// The table to select from
    pub table: String,

    /// Alias of the base table
    pub alias: String,

    /// Joined tables, in join order
    pub joins: Vec<Join>,

    /// Projection, in output column order
    pub returning: Vec<SelectItem>,

    pub filter: Option<Expr>,

    pub order_by: Vec<OrderByExpr>,

    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub expr: Expr,

    /// Output column name, when it differs from the expression
    pub alias: Option<String>,
}

impl Select {
    pub fn new(table: impl Into<String>) -> Select {
        let table = table.into();
        Select {
            alias: table.clone(),
            table,
            joins: vec![],
            returning: vec![],
            filter: None,
            order_by: vec![],
            limit: None,
        }
    }

    /// Aliases under which `table` is currently joined.
    pub fn aliases_of(&self, table: &str) -> impl Iterator<Item = &str> + '_ {
        let table = table.to_string();
        self.joins
            .iter()
            .filter(move |join| join.table == table)
            .map(|join| &join.alias[..])
    }

    pub fn join_by_alias(&self, alias: &str) -> Option<&Join> {
        self.joins.iter().find(|join| join.alias == alias)
    }

    /// Left-joins `table` and returns the alias it is reachable under.
    ///
    /// An existing join of `table` is reused when its alias is in `reuse` and
    /// not in `exclusions`. Otherwise a join with a fresh generic alias is
    /// added; `on` builds its condition given that alias.
    pub fn join(
        &mut self,
        table: &str,
        reuse: &HashSet<String>,
        exclusions: &HashSet<String>,
        on: impl FnOnce(&str) -> Expr,
    ) -> String {
        let existing = self.joins.iter().find(|join| {
            join.table == table && reuse.contains(&join.alias) && !exclusions.contains(&join.alias)
        });

        if let Some(join) = existing {
            return join.alias.clone();
        }

        let alias = self.fresh_alias();
        let constraint = JoinOp::Left(on(&alias));

        self.joins.push(Join {
            table: table.to_string(),
            alias: alias.clone(),
            constraint,
        });

        alias
    }

    /// Renames table aliases, updating every column reference in the
    /// statement.
    pub fn change_aliases(&mut self, change_map: &HashMap<String, String>) {
        let mut rename = |column: &mut ExprColumn| {
            if let Some(new) = change_map.get(&column.table) {
                column.table = new.clone();
            }
        };

        for join in &mut self.joins {
            if let Some(new) = change_map.get(&join.alias) {
                join.alias = new.clone();
            }
            join.constraint.expr_mut().for_each_column_mut(&mut rename);
        }

        for item in &mut self.returning {
            item.expr.for_each_column_mut(&mut rename);
        }

        if let Some(filter) = &mut self.filter {
            filter.for_each_column_mut(&mut rename);
        }

        for order_by in &mut self.order_by {
            order_by.expr.for_each_column_mut(&mut rename);
        }
    }

    /// ANDs `expr` onto the filter.
    pub fn add_filter(&mut self, expr: Expr) {
        self.filter = Some(match self.filter.take() {
            Some(filter) => Expr::and(filter, expr),
            None => expr,
        });
    }

    fn fresh_alias(&self) -> String {
        let mut n = self.joins.len() + 1;
        loop {
            let alias = format!("T{n}");
            if alias != self.alias && self.join_by_alias(&alias).is_none() {
                return alias;
            }
            n += 1;
        }
    }
}
