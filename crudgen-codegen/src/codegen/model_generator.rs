//! Model generator - emits ORM model classes and remote model skeletons

use super::associations::ClassifiedAssociation;
use super::options::EntityOptions;
use super::type_resolver::TypeResolver;
use crate::error::Result;
use crate::parser::RelationShape;

/// Generate `models/<name>.js` for a relational entity
pub fn generate_model(opts: &EntityOptions) -> Result<String> {
    let mut code = String::new();

    code.push_str("'use strict';\n\n");
    code.push_str("const Sequelize = require('sequelize');\n");
    code.push_str("const helper = require('../utils/helper');\n\n");
    code.push_str(&format!(
        "module.exports = class {} extends Sequelize.Model {{\n\n",
        opts.name
    ));

    // init: declared attributes with their column types
    code.push_str("    static init(sequelize, DataTypes) {\n");
    code.push_str("        return super.init({\n");
    for (name, primitive) in opts.attributes.iter() {
        let ty = TypeResolver::resolve(primitive)?;
        code.push_str(&format!(
            "            {}: {{\n                type: {}\n            }},\n",
            name,
            ty.to_type_string()
        ));
    }
    code.push_str("        }, {\n");
    code.push_str(&format!("            modelName: '{}',\n", opts.name_lc));
    code.push_str(&format!("            tableName: '{}',\n", opts.table));
    code.push_str("            sequelize\n");
    code.push_str("        });\n");
    code.push_str("    }\n\n");

    // associate: only associations the ORM can resolve by itself
    code.push_str("    static associate(models) {\n");
    for association in opts.associations.implicit_associations.iter() {
        code.push_str(&generate_association_call(opts, association));
    }
    code.push_str("    }\n\n");

    code.push_str(&generate_data_access(opts));

    code.push_str("    getIdValue() {\n        return this.id;\n    }\n");
    code.push_str("};\n");

    Ok(code)
}

/// Static CRUD methods backing the entity's resolvers
fn generate_data_access(opts: &EntityOptions) -> String {
    let name = &opts.name;
    let mut code = String::new();

    code.push_str(&format!(
        r#"    static async readById(id) {{
        let item = await {name}.findByPk(id);
        if (item === null) {{
            throw new Error(`Record with ID = "${{id}}" does not exist`);
        }}
        return item;
    }}

    static readAll(search, order, pagination) {{
        return {name}.findAll(helper.buildQueryOptions(search, order, pagination));
    }}

    static countRecords(search) {{
        return {name}.count(helper.buildQueryOptions(search));
    }}

    static addOne(input) {{
        return {name}.create(input);
    }}

    static async deleteOne(id) {{
        let deleted = await {name}.destroy({{ where: {{ id: id }} }});
        if (deleted === 0) {{
            throw new Error(`Record with ID = "${{id}}" does not exist`);
        }}
        return id;
    }}

    static async updateOne(input) {{
        let item = await {name}.readById(input.id);
        return item.update(input);
    }}

    static async bulkAddCsv(context) {{
        let delim = context.request.body.delim || ',';
        let records = await helper.parseCsv(context.request.files.csv_file, delim);
        await {name}.bulkCreate(records, {{ validate: true }});
        return `Successfully added ${{records.length}} records`;
    }}

"#,
        name = name
    ));

    let (columns, types): (Vec<&str>, Vec<&str>) = opts
        .attributes
        .iter()
        .map(|(column, ty)| (column.as_str(), ty.as_str()))
        .unzip();
    code.push_str(&format!(
        "    static csvTableTemplate() {{\n        return ['{}', '{}'];\n    }}\n\n",
        columns.join(","),
        types.join(",")
    ));

    code
}

fn generate_association_call(opts: &EntityOptions, association: &ClassifiedAssociation) -> String {
    let owner = &opts.name;
    let target = format!("models.{}", association.target_lc);
    let alias = &association.name_lc;
    let owner_key = format!("{}Id", opts.name_lc);
    let target_key = association.target_key.clone();

    match association.shape {
        RelationShape::BelongsTo => format!(
            "        {}.belongsTo({}, {{ as: '{}', foreignKey: '{}' }});\n",
            owner,
            target,
            alias,
            target_key.unwrap_or_default()
        ),
        RelationShape::HasOne => format!(
            "        {}.hasOne({}, {{ as: '{}', foreignKey: '{}' }});\n",
            owner,
            target,
            alias,
            target_key.unwrap_or(owner_key)
        ),
        RelationShape::HasMany => format!(
            "        {}.hasMany({}, {{ as: '{}', foreignKey: '{}' }});\n",
            owner,
            target,
            alias,
            target_key.unwrap_or(owner_key)
        ),
        RelationShape::BelongsToMany => format!(
            "        {}.belongsToMany({}, {{ as: '{}', foreignKey: '{}', through: '{}', onDelete: 'CASCADE' }});\n",
            owner,
            target,
            alias,
            association.source_key.clone().unwrap_or(owner_key),
            association.keys_in.clone().unwrap_or_default()
        ),
    }
}

/// Generate `models-webservice/<name>.js` for a remote entity
///
/// The data access methods of the generated class are left for the user to
/// fill in against the remote service.
pub fn generate_webservice_model(opts: &EntityOptions) -> String {
    let mut code = String::new();

    code.push_str("const axios = require('axios');\n\n");
    code.push_str(&format!(
        "const remoteUrl = process.env.{}_REMOTE_URL || '';\n\n",
        opts.name_pl.to_uppercase()
    ));
    code.push_str(&format!("module.exports = class {} {{\n\n", opts.name));

    let fields: Vec<&str> = std::iter::once("id")
        .chain(opts.attributes.keys().map(String::as_str).filter(|k| *k != "id"))
        .collect();
    code.push_str(&format!("    constructor({{ {} }}) {{\n", fields.join(", ")));
    for field in &fields {
        code.push_str(&format!("        this.{} = {};\n", field, field));
    }
    code.push_str("    }\n\n");

    for (method, args) in [
        ("readById", "id"),
        ("readAll", "search, order, pagination"),
        ("countRecords", "search"),
        ("addOne", "input"),
        ("deleteOne", "id"),
        ("updateOne", "input"),
        ("bulkAddCsv", "context"),
        ("csvTableTemplate", ""),
    ] {
        code.push_str(&format!(
            "    static {}({}) {{\n        throw new Error('{}.{} is not implemented for remote service ' + remoteUrl);\n    }}\n\n",
            method, args, opts.name, method
        ));
    }

    code.push_str("    getIdValue() {\n        return this.id;\n    }\n");
    code.push_str("};\n");

    code
}
