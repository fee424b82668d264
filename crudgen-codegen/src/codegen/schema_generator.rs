//! Schema generator - emits the GraphQL schema module of an entity

use super::options::EntityOptions;

/// Generate `schemas/<name>.js`
pub fn generate_schema(opts: &EntityOptions) -> String {
    let mut code = String::new();

    code.push_str("module.exports = `\n");
    code.push_str(&generate_type(opts));
    code.push('\n');
    code.push_str(&generate_vue_table_type(opts));
    code.push('\n');
    code.push_str(&generate_field_enum(opts));
    code.push('\n');
    code.push_str(&generate_inputs(opts));
    code.push('\n');
    code.push_str(&generate_query(opts));
    code.push('\n');
    code.push_str(&generate_mutation(opts));
    code.push_str("`;\n");

    code
}

fn generate_type(opts: &EntityOptions) -> String {
    let mut code = String::new();
    code.push_str(&format!("  type {} {{\n", opts.name));
    code.push_str("    id: ID\n");
    for (name, ty) in opts.attributes.iter() {
        code.push_str(&format!("    {}: {}\n", name, ty));
    }

    for (name, target) in opts.associations.schema_attributes_one.iter() {
        code.push_str(&format!(
            "    {}(search: search{}Input): {}\n",
            name,
            super::naming::capitalize(target),
            target
        ));
    }

    for (name, many) in opts.associations.schema_attributes_many.iter() {
        code.push_str(&format!(
            "    {}Filter(search: search{}Input, order: [ order{}Input ], pagination: paginationInput): [{}]\n",
            name, many.target_cp, many.target_cp, many.target
        ));
        code.push_str(&format!(
            "    countFiltered{}(search: search{}Input): Int\n",
            super::naming::capitalize(name),
            many.target_cp
        ));
    }

    code.push_str("  }\n");
    code
}

fn generate_vue_table_type(opts: &EntityOptions) -> String {
    let mut code = String::new();
    code.push_str(&format!("  type VueTable{} {{\n", opts.name_cp));
    code.push_str(&format!("    data: [{}]\n", opts.name));
    for field in [
        "total: Int",
        "per_page: Int",
        "current_page: Int",
        "last_page: Int",
        "prev_page_url: String",
        "next_page_url: String",
        "from: Int",
        "to: Int",
    ] {
        code.push_str(&format!("    {}\n", field));
    }
    code.push_str("  }\n");
    code
}

fn generate_field_enum(opts: &EntityOptions) -> String {
    let mut code = String::new();
    code.push_str(&format!("  enum {}Field {{\n", opts.name_cp));
    code.push_str("    id\n");
    for name in opts.attributes.keys().filter(|name| *name != "id") {
        code.push_str(&format!("    {}\n", name));
    }
    code.push_str("  }\n");
    code
}

fn generate_inputs(opts: &EntityOptions) -> String {
    let cp = &opts.name_cp;
    format!(
        "  input search{cp}Input {{\n    field: {cp}Field\n    value: typeValue\n    operator: Operator\n    search: [search{cp}Input]\n  }}\n\n  input order{cp}Input {{\n    field: {cp}Field\n    order: Order\n  }}\n"
    )
}

fn generate_query(opts: &EntityOptions) -> String {
    let mut code = String::new();
    code.push_str("  type Query {\n");
    code.push_str(&format!(
        "    {}(search: search{}Input, order: [ order{}Input ], pagination: paginationInput): [{}]\n",
        opts.name_pl, opts.name_cp, opts.name_cp, opts.name
    ));
    code.push_str(&format!(
        "    readOne{}(id: ID!): {}\n",
        opts.name_cp, opts.name
    ));
    code.push_str(&format!(
        "    count{}(search: search{}Input): Int\n",
        opts.name_pl_cp, opts.name_cp
    ));
    code.push_str(&format!(
        "    vueTable{}: VueTable{}\n",
        opts.name_cp, opts.name_cp
    ));
    code.push_str(&format!(
        "    csvTableTemplate{}: [String]\n",
        opts.name_cp
    ));
    code.push_str("  }\n");
    code
}

fn generate_mutation(opts: &EntityOptions) -> String {
    let arguments = opts.mutation_arguments();
    let mut code = String::new();
    code.push_str("  type Mutation {\n");
    code.push_str(&format!(
        "    add{}({}): {}!\n",
        opts.name_cp, arguments, opts.name
    ));
    code.push_str(&format!("    delete{}(id: ID!): String!\n", opts.name_cp));

    let update_arguments = if arguments.is_empty() {
        "id: ID!".to_string()
    } else {
        format!("id: ID!, {}", arguments)
    };
    code.push_str(&format!(
        "    update{}({}): {}!\n",
        opts.name_cp, update_arguments, opts.name
    ));
    code.push_str(&format!(
        "    bulkAdd{}Csv: [{}]\n",
        opts.name_cp, opts.name
    ));
    code.push_str("  }\n");
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_definition;

    fn strip(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn options(json: &str) -> EntityOptions {
        EntityOptions::from_definition(&parse_definition(json, "test.json").unwrap()).unwrap()
    }

    #[test]
    fn test_book_schema() {
        let opts = options(
            r#"{
                "model": "Book",
                "storageType": "sql",
                "attributes": { "title": "String", "genre": "String" },
                "associations": {
                    "publisher": {
                        "type": "cross_belongsTo",
                        "target": "Publisher",
                        "targetKey": "publisherId",
                        "targetStorageType": "webservice"
                    },
                    "authors": {
                        "type": "sql_belongsToMany",
                        "target": "Person",
                        "targetKey": "personId",
                        "keysIn": "books_to_people",
                        "targetStorageType": "sql"
                    }
                }
            }"#,
        );
        let schema = strip(&generate_schema(&opts));

        assert!(schema.contains(&strip(
            "type Book { id: ID title: String genre: String
               publisher(search: searchPublisherInput): Publisher
               authorsFilter(search: searchPersonInput, order: [ orderPersonInput ], pagination: paginationInput): [Person]
               countFilteredAuthors(search: searchPersonInput): Int }"
        )));
        assert!(schema.contains(&strip(
            "addBook(title: String, genre: String, publisherId: Int): Book!"
        )));
        assert!(schema.contains(&strip(
            "updateBook(id: ID!, title: String, genre: String, publisherId: Int): Book!"
        )));
        assert!(schema.contains(&strip("enum BookField { id title genre }")));
        assert!(schema.contains(&strip("countBooks(search: searchBookInput): Int")));
    }

    #[test]
    fn test_camel_case_names() {
        let opts = options(
            r#"{"model": "inDiVIdual", "storageType": "sql", "attributes": {"name": "String"}}"#,
        );
        let schema = strip(&generate_schema(&opts));
        assert!(schema.contains("typeinDiVIdual{"));
        assert!(schema.contains("addInDiVIdual(name:String):inDiVIdual!"));
        assert!(schema.contains("readOneInDiVIdual(id:ID!):inDiVIdual"));
        assert!(schema.contains("inDiVIduals(search:searchInDiVIdualInput"));
    }

    #[test]
    fn test_update_without_attributes() {
        let opts = options(r#"{"model": "tag", "storageType": "sql", "attributes": {}}"#);
        let schema = strip(&generate_schema(&opts));
        assert!(schema.contains("addTag():tag!"));
        assert!(schema.contains("updateTag(id:ID!):tag!"));
    }
}
