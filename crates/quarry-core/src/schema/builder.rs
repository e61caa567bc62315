use super::{
    BelongsTo, FieldDef, FieldId, GeneratorStrategy, HasMany, IndexDef, Inheritance, ManyToMany,
    ModelId, Relation, TableDef,
};
use crate::{stmt::Type, Error, Result};

/// Declarative description of one field, consumed by [`TableBuilder`].
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    column: Option<String>,
    ty: Type,
    nullable: bool,
    unique: bool,
    length: Option<usize>,
    primary_key: bool,
    version: bool,
    transient: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            column: None,
            ty,
            nullable: false,
            unique: false,
            length: None,
            primary_key: false,
            version: false,
            transient: false,
        }
    }

    /// Override the column name; defaults to the field name.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn version(mut self) -> Self {
        self.version = true;
        self
    }

    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }
}

/// The explicit one-time introspection pass for a mapped type.
///
/// `build()` validates the mapping and produces an immutable [`TableDef`];
/// every violation is a configuration error, never silently ignored.
pub struct TableBuilder {
    id: ModelId,
    model_name: String,
    table: String,
    fields: Vec<FieldSpec>,
    generator: GeneratorStrategy,
    discriminator: Option<String>,
    relations: Vec<Relation>,
    indexes: Vec<(String, Vec<String>, bool)>,
}

impl TableBuilder {
    pub fn new(id: ModelId, model_name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            id,
            model_name: model_name.into(),
            table: table.into(),
            fields: Vec::new(),
            generator: GeneratorStrategy::None,
            discriminator: None,
            relations: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Fold the fields of a non-mapped ancestor into this table
    /// (mapped-superclass flattening). The ancestor is otherwise invisible
    /// to the query layer.
    pub fn inherit(mut self, specs: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(specs);
        self
    }

    pub fn generator(mut self, generator: GeneratorStrategy) -> Self {
        self.generator = generator;
        self
    }

    /// Mark the named field as the single-table inheritance discriminator.
    pub fn discriminator(mut self, field: impl Into<String>) -> Self {
        self.discriminator = Some(field.into());
        self
    }

    pub fn has_many(
        mut self,
        target: ModelId,
        foreign_key: FieldId,
        cascade_delete: bool,
        eager: bool,
    ) -> Self {
        self.relations.push(Relation::HasMany(HasMany {
            target,
            foreign_key,
            cascade_delete,
            eager,
        }));
        self
    }

    pub fn many_to_many(
        mut self,
        target: ModelId,
        join_table: impl Into<String>,
        source_column: impl Into<String>,
        target_column: impl Into<String>,
        cascade_delete: bool,
        eager: bool,
    ) -> Self {
        self.relations.push(Relation::ManyToMany(ManyToMany {
            target,
            join_table: join_table.into(),
            source_column: source_column.into(),
            target_column: target_column.into(),
            cascade_delete,
            eager,
        }));
        self
    }

    pub fn belongs_to(mut self, target: ModelId, field: FieldId) -> Self {
        self.relations
            .push(Relation::BelongsTo(BelongsTo { target, field }));
        self
    }

    pub fn index(
        mut self,
        name: impl Into<String>,
        fields: impl IntoIterator<Item = impl Into<String>>,
        unique: bool,
    ) -> Self {
        self.indexes.push((
            name.into(),
            fields.into_iter().map(Into::into).collect(),
            unique,
        ));
        self
    }

    pub fn build(self) -> Result<TableDef> {
        let model_name = self.model_name;
        let id = self.id;

        let fields: Vec<FieldDef> = self
            .fields
            .into_iter()
            .enumerate()
            .map(|(index, spec)| FieldDef {
                id: FieldId::new(id, index),
                column: spec.column.unwrap_or_else(|| spec.name.clone()),
                name: spec.name,
                ty: spec.ty,
                nullable: spec.nullable,
                unique: spec.unique,
                length: spec.length,
                primary_key: spec.primary_key,
                version: spec.version,
                transient: spec.transient,
            })
            .collect();

        let mut primary_key = None;
        for (index, field) in fields.iter().enumerate() {
            if !field.primary_key {
                continue;
            }
            if field.transient {
                return Err(Error::configuration(format!(
                    "model `{model_name}`: transient field `{}` cannot be the primary key",
                    field.name
                )));
            }
            if primary_key.is_some() {
                return Err(Error::configuration(format!(
                    "model `{model_name}` declares more than one primary key"
                )));
            }
            primary_key = Some(index);
        }

        let mut version_field = None;
        for (index, field) in fields.iter().enumerate() {
            if !field.version {
                continue;
            }
            if version_field.is_some() {
                return Err(Error::configuration(format!(
                    "model `{model_name}` declares more than one version field"
                )));
            }
            if !field.ty.is_integer_family() {
                return Err(Error::configuration(format!(
                    "model `{model_name}`: version field `{}` must be an integer type",
                    field.name
                )));
            }
            version_field = Some(index);
        }

        // A relation is honored only once a primary key is known.
        if !self.relations.is_empty() && primary_key.is_none() {
            return Err(Error::configuration(format!(
                "model `{model_name}` declares a relation but no primary key"
            )));
        }

        let inheritance = match self.discriminator {
            None => Inheritance::None,
            Some(name) => {
                let field = fields
                    .iter()
                    .position(|field| field.name == name)
                    .ok_or_else(|| {
                        Error::configuration(format!(
                            "model `{model_name}`: discriminator field `{name}` is not mapped"
                        ))
                    })?;
                if fields[field].ty != Type::Text {
                    return Err(Error::configuration(format!(
                        "model `{model_name}`: discriminator field `{name}` must be a text type"
                    )));
                }
                Inheritance::SingleTable { field }
            }
        };

        if !matches!(self.generator, GeneratorStrategy::None) && primary_key.is_none() {
            return Err(Error::configuration(format!(
                "model `{model_name}` declares a key generator but no primary key"
            )));
        }

        let mut indexes = Vec::new();

        // Unique fields get an implicit unique index.
        for (index, field) in fields.iter().enumerate() {
            if field.unique && !field.primary_key {
                indexes.push(IndexDef {
                    name: format!("idx_{}_{}", self.table, field.column),
                    fields: vec![index],
                    unique: true,
                });
            }
        }

        for (name, field_names, unique) in self.indexes {
            let mut field_indexes = Vec::with_capacity(field_names.len());
            for field_name in &field_names {
                let index = fields
                    .iter()
                    .position(|field| &field.name == field_name)
                    .ok_or_else(|| {
                        Error::configuration(format!(
                            "model `{model_name}`: index `{name}` references unknown field `{field_name}`"
                        ))
                    })?;
                field_indexes.push(index);
            }
            indexes.push(IndexDef {
                name,
                fields: field_indexes,
                unique,
            });
        }

        Ok(TableDef {
            id,
            model_name,
            name: self.table,
            fields,
            primary_key,
            generator: self.generator,
            version_field,
            inheritance,
            relations: self.relations,
            indexes,
        })
    }
}
