//! Migration generator - emits table, column and join-table migrations

use super::associations::ClassifiedAssociation;
use super::options::EntityOptions;
use super::type_resolver::TypeResolver;
use crate::error::Result;

/// Generate the create-table migration of a relational entity
pub fn generate_table_migration(opts: &EntityOptions) -> Result<String> {
    let mut code = String::new();

    code.push_str("'use strict';\n\n");
    code.push_str("module.exports = {\n\n");
    code.push_str("    up: function(queryInterface, Sequelize) {\n");
    code.push_str(&format!(
        "        return queryInterface.createTable('{}', {{\n",
        opts.table
    ));
    code.push_str(&id_and_timestamps());
    for (name, primitive) in opts.attributes.iter() {
        if name == "id" {
            continue;
        }
        let ty = TypeResolver::resolve(primitive)?;
        code.push_str(&format!(
            "            {}: {{\n                type: {}\n            }},\n",
            name,
            ty.to_type_string()
        ));
    }

    if opts.indices.is_empty() {
        code.push_str("        });\n");
    } else {
        code.push_str("        }).then(() => {\n");
        let calls: Vec<String> = opts
            .indices
            .iter()
            .map(|index| format!("queryInterface.addIndex('{}', ['{}'])", opts.table, index))
            .collect();
        code.push_str(&format!(
            "            return Promise.all([\n                {}\n            ]);\n",
            calls.join(",\n                ")
        ));
        code.push_str("        });\n");
    }
    code.push_str("    },\n\n");

    code.push_str("    down: function(queryInterface, Sequelize) {\n");
    code.push_str(&format!(
        "        return queryInterface.dropTable('{}');\n",
        opts.table
    ));
    code.push_str("    }\n\n");
    code.push_str("};\n");

    Ok(code)
}

/// Generate the add-column migration for an implicit `belongsTo`
pub fn generate_column_migration(owner: &EntityOptions, association: &ClassifiedAssociation) -> String {
    let column = association.target_key.clone().unwrap_or_default();
    format!(
        "'use strict';

module.exports = {{

    up: function(queryInterface, Sequelize) {{
        return queryInterface.addColumn('{source}', '{column}', {{
            type: Sequelize.INTEGER,
            references: {{
                model: '{target_table}',
                key: 'id'
            }},
            onUpdate: 'CASCADE',
            onDelete: 'SET NULL'
        }});
    }},

    down: function(queryInterface, Sequelize) {{
        return queryInterface.removeColumn('{source}', '{column}');
    }}

}};
",
        source = owner.table,
        column = column,
        target_table = association.target_lc_pl,
    )
}

/// Generate the join-table migration for an implicit `belongsToMany`
pub fn generate_through_migration(
    owner: &EntityOptions,
    association: &ClassifiedAssociation,
) -> String {
    let through = association.keys_in.clone().unwrap_or_default();
    let source_key = association
        .source_key
        .clone()
        .unwrap_or_else(|| format!("{}Id", owner.name_lc));
    let target_key = association
        .target_key
        .clone()
        .unwrap_or_else(|| format!("{}Id", association.target_lc));

    let mut code = String::new();
    code.push_str("'use strict';\n\n");
    code.push_str("module.exports = {\n\n");
    code.push_str("    up: function(queryInterface, Sequelize) {\n");
    code.push_str(&format!(
        "        return queryInterface.createTable('{}', {{\n",
        through
    ));
    code.push_str(&id_and_timestamps());
    code.push_str(&reference_column(&source_key, &owner.table));
    code.push_str(&reference_column(&target_key, &association.target_lc_pl));
    code.push_str("        });\n");
    code.push_str("    },\n\n");
    code.push_str("    down: function(queryInterface, Sequelize) {\n");
    code.push_str(&format!(
        "        return queryInterface.dropTable('{}');\n",
        through
    ));
    code.push_str("    }\n\n");
    code.push_str("};\n");
    code
}

fn id_and_timestamps() -> String {
    "            id: {
                type: Sequelize.INTEGER,
                primaryKey: true,
                autoIncrement: true
            },
            createdAt: {
                type: Sequelize.DATE
            },
            updatedAt: {
                type: Sequelize.DATE
            },
"
    .to_string()
}

fn reference_column(column: &str, table: &str) -> String {
    format!(
        "            {column}: {{
                type: Sequelize.INTEGER,
                onDelete: 'CASCADE',
                references: {{
                    model: '{table}',
                    key: 'id'
                }}
            }},
"
    )
}
