//! Resolver generator - emits GraphQL resolvers for an entity
//!
//! Implicit associations delegate to ORM accessors on the model instance;
//! explicit ones call the resolvers of the other side.

use super::associations::ClassifiedAssociation;
use super::options::EntityOptions;
use super::renderer::IndexedModel;
use crate::parser::{Arity, RelationShape};

/// Generate `resolvers/<name>.js` for a relational entity
pub fn generate_resolvers(opts: &EntityOptions) -> String {
    generate(opts, "models")
}

/// Generate `resolvers/<name>.js` for a remote entity
pub fn generate_webservice_resolvers(opts: &EntityOptions) -> String {
    generate(opts, "models-webservice")
}

/// Generate `resolvers/index.js` merging every entity's resolvers
pub fn generate_resolvers_index(models: &[IndexedModel]) -> String {
    let mut code = String::new();
    for model in models {
        code.push_str(&format!(
            "const {} = require('./{}');\n",
            model.name, model.name_lc
        ));
    }
    code.push('\n');
    let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
    code.push_str(&format!(
        "module.exports = Object.assign({{}}, {});\n",
        names.join(", ")
    ));
    code
}

fn generate(opts: &EntityOptions, models_dir: &str) -> String {
    let mut code = String::new();

    code.push_str("/*\n    Resolvers for basic CRUD operations\n*/\n\n");
    code.push_str("const path = require('path');\n");
    code.push_str(&format!(
        "const {} = require(path.join(__dirname, '..', '{}', '{}.js'));\n",
        opts.name, models_dir, opts.name_lc
    ));
    code.push_str("const helper = require('../utils/helper');\n");
    code.push_str("const checkAuthorization = require('../utils/check-authorization');\n");
    code.push_str("const resolvers = require(path.join(__dirname, 'index.js'));\n\n");

    for association in opts.associations.implicit_associations.iter() {
        code.push_str(&generate_implicit_resolver(opts, association));
        code.push('\n');
    }
    for association in opts.associations.explicit_resolvers.iter() {
        code.push_str(&generate_explicit_resolver(opts, association));
        code.push('\n');
    }

    code.push_str("module.exports = {\n");
    let operations = [
        (
            opts.name_pl.clone(),
            "{ search, order, pagination }",
            "read",
            format!("return {}.readAll(search, order, pagination);", opts.name),
        ),
        (
            format!("readOne{}", opts.name_cp),
            "{ id }",
            "read",
            format!("return {}.readById(id);", opts.name),
        ),
        (
            format!("count{}", opts.name_pl_cp),
            "{ search }",
            "read",
            format!("return {}.countRecords(search);", opts.name),
        ),
        (
            format!("vueTable{}", opts.name_cp),
            "_",
            "read",
            format!(
                "return helper.vueTable(context.request, {}, {});",
                opts.name,
                js_string_array(&opts.array_attribute_string)
            ),
        ),
        (
            format!("add{}", opts.name_cp),
            "input",
            "create",
            format!("return {}.addOne(input);", opts.name),
        ),
        (
            format!("delete{}", opts.name_cp),
            "{ id }",
            "delete",
            format!(
                "return {}.deleteOne(id).then(() => 'Item successfully deleted');",
                opts.name
            ),
        ),
        (
            format!("update{}", opts.name_cp),
            "input",
            "update",
            format!("return {}.updateOne(input);", opts.name),
        ),
        (
            format!("bulkAdd{}Csv", opts.name_cp),
            "_",
            "create",
            format!("return {}.bulkAddCsv(context);", opts.name),
        ),
        (
            format!("csvTableTemplate{}", opts.name_cp),
            "_",
            "read",
            format!("return {}.csvTableTemplate();", opts.name),
        ),
    ];
    for (operation, params, permission, body) in &operations {
        code.push_str(&generate_operation(
            &opts.name, operation, params, permission, body,
        ));
    }
    code.push_str("};\n");

    code
}

fn generate_operation(
    model: &str,
    operation: &str,
    params: &str,
    permission: &str,
    body: &str,
) -> String {
    format!(
        "    {operation}: function({params}, context) {{
        return checkAuthorization(context, '{model}', '{permission}').then(authorization => {{
            if (authorization === true) {{
                {body}
            }} else {{
                throw new Error(\"You don't have authorization to perform this action\");
            }}
        }}).catch(error => {{
            console.error(error);
            throw error;
        }});
    }},
"
    )
}

/// Column on the other side that points back to this entity
fn reverse_key(opts: &EntityOptions, association: &ClassifiedAssociation) -> String {
    association
        .target_key
        .clone()
        .unwrap_or_else(|| format!("{}Id", opts.name_lc))
}

fn generate_implicit_resolver(opts: &EntityOptions, association: &ClassifiedAssociation) -> String {
    let model = &opts.name;
    let name = &association.name_lc;
    let accessor = &association.name_cp;

    match association.arity() {
        Arity::One => format!(
            "{model}.prototype.{name} = function({{ search }}, context) {{
    return this.get{accessor}();
}};
"
        ),
        Arity::Many => format!(
            "{model}.prototype.{name}Filter = function({{ search, order, pagination }}, context) {{
    return this.get{accessor}(helper.buildQueryOptions(search, order, pagination));
}};

{model}.prototype.countFiltered{accessor} = function({{ search }}, context) {{
    return this.count{accessor}(helper.buildQueryOptions(search));
}};
"
        ),
    }
}

fn generate_explicit_resolver(opts: &EntityOptions, association: &ClassifiedAssociation) -> String {
    let model = &opts.name;
    let name = &association.name_lc;
    let name_cp = &association.name_cp;
    let target_cp = &association.target_cp;
    let target_lc_pl = &association.target_lc_pl;
    let target_cp_pl = &association.target_cp_pl;

    match association.shape {
        RelationShape::BelongsTo => {
            let key = reverse_key(opts, association);
            format!(
                "{model}.prototype.{name} = function({{ search }}, context) {{
    if (this.{key} === null || this.{key} === undefined) {{
        return null;
    }}
    return resolvers.readOne{target_cp}({{ id: this.{key} }}, context);
}};
"
            )
        }
        RelationShape::HasOne => {
            let key = reverse_key(opts, association);
            format!(
                "{model}.prototype.{name} = async function({{ search }}, context) {{
    let nsearch = helper.addSearchField({{
        search: search,
        field: '{key}',
        value: {{ value: this.getIdValue() }},
        operator: 'eq'
    }});
    let found = await resolvers.{target_lc_pl}({{ search: nsearch, pagination: {{ limit: 1 }} }}, context);
    return found.length > 0 ? found[0] : null;
}};
"
            )
        }
        RelationShape::HasMany | RelationShape::BelongsToMany => {
            let key = reverse_key(opts, association);
            format!(
                "{model}.prototype.{name}Filter = function({{ search, order, pagination }}, context) {{
    let nsearch = helper.addSearchField({{
        search: search,
        field: '{key}',
        value: {{ value: this.getIdValue() }},
        operator: 'eq'
    }});
    return resolvers.{target_lc_pl}({{ search: nsearch, order: order, pagination: pagination }}, context);
}};

{model}.prototype.countFiltered{name_cp} = function({{ search }}, context) {{
    let nsearch = helper.addSearchField({{
        search: search,
        field: '{key}',
        value: {{ value: this.getIdValue() }},
        operator: 'eq'
    }});
    return resolvers.count{target_cp_pl}({{ search: nsearch }}, context);
}};
"
            )
        }
    }
}

fn js_string_array(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|i| format!("'{}'", i)).collect();
    format!("[{}]", quoted.join(", "))
}
