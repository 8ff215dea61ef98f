use crate::{
    config::Options,
    db::{
        context::Context,
        index::{IndexError, dispatch::build_secondary_index_for_table},
        schema::{Index, IndexCollection, IndexProperties, Schema, is_valid_index_name},
        table::Table,
    },
    error::InternalError,
    obs::sink::{MetricsEvent, record},
};

///
/// CreateIndexRequest
///
/// Index definition as requested by a caller. Column names resolve
/// case-insensitively; an empty name is synthesized from the columns.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CreateIndexRequest {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
    pub user_defined: bool,
    pub comment: String,
}

impl CreateIndexRequest {
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    #[must_use]
    pub const fn user_defined(mut self) -> Self {
        self.user_defined = true;
        self
    }

    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

///
/// CreateIndexReturn
///

#[derive(Clone, Debug)]
pub struct CreateIndexReturn {
    pub new_table: Table,
    pub schema: Schema,

    /// Auto-generated index superseded by this one, if any.
    pub old_index: Option<Index>,
    pub new_index: Index,
}

/// Add an index to `table` and build its data.
///
/// An auto-generated index over the same columns is replaced; a
/// user-defined one makes the request fail. `table` itself is never
/// modified; the result carries a new snapshot.
pub fn create_index(
    ctx: &Context,
    table: &Table,
    request: &CreateIndexRequest,
    options: &Options,
) -> Result<CreateIndexReturn, InternalError> {
    let mut schema = table.schema().clone();

    // Phase 1: resolve requested columns to their stored names.
    let real_names = request
        .columns
        .iter()
        .map(|requested| {
            schema
                .all_cols()
                .by_name_case_insensitive(requested)
                .map(|col| col.name.clone())
                .ok_or_else(|| IndexError::ColumnNotFound {
                    column: requested.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Phase 2: pick and validate the name.
    let name = if request.name.is_empty() {
        synthesize_index_name(schema.indexes(), &real_names)
    } else {
        request.name.clone()
    };
    if !is_valid_index_name(&name) {
        return Err(IndexError::InvalidIndexName { name }.into());
    }

    // Phase 3: supersede an auto-generated index over the same columns.
    let mut table = table.clone();
    let mut old_index = None;
    let superseded = schema
        .indexes()
        .get_by_column_names(&real_names)
        .filter(|existing| !existing.is_user_defined())
        .map(|existing| existing.name().to_string());
    if let Some(old_name) = superseded {
        let existing = schema.remove_index(&old_name)?;
        table = table.delete_index_row_data(existing.name());
        options.debug_log(format!("replacing index '{}' with '{name}'", existing.name()));
        record(MetricsEvent::IndexReplaced {
            index: existing.name(),
        });
        old_index = Some(existing);
    }

    // Phase 4: define the index on the working schema.
    let new_index = schema.add_index_by_col_names(
        &name,
        &real_names,
        IndexProperties {
            is_unique: request.unique,
            is_user_defined: request.user_defined,
            comment: request.comment.clone(),
        },
        options.max_index_columns,
    )?;

    // Phase 5: build and attach index data.
    let new_table = table.update_schema(schema.clone());
    let data = build_secondary_index_for_table(ctx, &new_table, &new_index, options)?;
    let new_table = new_table.set_index_rows(new_index.name(), data)?;

    record(MetricsEvent::IndexCreated {
        index: new_index.name(),
    });

    Ok(CreateIndexReturn {
        new_table,
        schema,
        old_index,
        new_index,
    })
}

/// Concatenate column names, suffixing `_1`, `_2`, ... until unused.
fn synthesize_index_name(indexes: &IndexCollection, columns: &[String]) -> String {
    let base = columns.concat();
    let mut name = base.clone();
    let mut suffix = 0_u32;

    while indexes.get_by_name_case_insensitive(&name).is_some() {
        suffix += 1;
        name = format!("{base}_{suffix}");
    }

    name
}
