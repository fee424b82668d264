//! Integration tests for crudgen-codegen
//!
//! `build.rs` generates a full server skeleton from `fixtures/models` into
//! OUT_DIR with lenient association handling; the tests below inspect those
//! files and also drive the library directly against temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use crudgen_codegen::codegen::{build_options, UnsupportedKindPolicy};
use crudgen_codegen::parser::{load_definition, load_definitions};
use crudgen_codegen::{CodegenBuilder, CodegenError, EntityOptions};
use serde_json::json;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../fixtures/models")
}

fn generated(relative: &str) -> String {
    let path = Path::new(env!("OUT_DIR")).join(relative);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn fixture_options(file: &str, policy: UnsupportedKindPolicy) -> EntityOptions {
    let definition = load_definition(&fixtures_dir().join(file)).unwrap();
    build_options(&definition, policy).unwrap()
}

/// Drop the timestamp: `20261015120000-book.js` -> `book.js`
fn discriminator(file_name: &str) -> &str {
    file_name.split_once('-').map(|(_, rest)| rest).unwrap_or(file_name)
}

// ============================================================================
// Generated by build.rs
// ============================================================================

#[test]
fn test_book_schema() {
    let schema = generated("schemas/book.js");
    assert!(schema.contains("type book {"));
    assert!(schema.contains("    title: String\n    genre: String\n    pages: Int\n"));
    assert!(schema.contains("publisher(search: searchPublisherInput): Publisher"));
    assert!(schema.contains("authorsFilter(search: searchPersonInput"));
    assert!(schema.contains("countFilteredCountries(search: searchCountryInput): Int"));
    assert!(schema.contains("addBook(title: String, genre: String, pages: Int, publisherId: Int): book!"));
    assert!(schema.contains("countBooks(search: searchBookInput): Int"));
}

#[test]
fn test_book_resolvers_split_by_storage() {
    let resolvers = generated("resolvers/book.js");
    // both sides relational: ORM accessor
    assert!(resolvers.contains("return this.getPublisher();"));
    assert!(resolvers.contains("return this.getAuthors("));
    // remote target: explicit lookup through the other side's resolvers
    assert!(resolvers.contains("book.prototype.countriesFilter"));
    assert!(resolvers.contains("resolvers.countries({ search: nsearch"));
    assert!(resolvers.contains("resolvers.countCountries({ search: nsearch }"));
}

#[test]
fn test_book_model_associations() {
    let model = generated("models/book.js");
    assert!(model.contains(
        "book.belongsTo(models.publisher, { as: 'publisher', foreignKey: 'publisherId' });"
    ));
    assert!(model.contains("through: 'books_to_people'"));
    assert!(!model.contains("models.country"));
}

#[test]
fn test_remote_entity_artifacts() {
    let out = Path::new(env!("OUT_DIR"));
    assert!(out.join("schemas/country.js").exists());
    assert!(out.join("resolvers/country.js").exists());
    assert!(out.join("models-webservice/country.js").exists());
    assert!(!out.join("models/country.js").exists());

    let resolvers = generated("resolvers/country.js");
    // relational prefix, but the owner is remote
    assert!(resolvers.contains("resolvers.books({ search: nsearch"));
    assert!(!resolvers.contains("this.getBooks("));

    let model = generated("models-webservice/country.js");
    assert!(model.contains("process.env.COUNTRIES_REMOTE_URL"));
}

#[test]
fn test_mixed_case_names() {
    let schema = generated("schemas/inDiVIdual.js");
    assert!(schema.contains("type inDiVIdual {"));
    assert!(schema.contains("inDiVIduals(search: searchInDiVIdualInput"));
    assert!(schema.contains("countInDiVIduals(search: searchInDiVIdualInput): Int"));
    assert!(schema.contains("transcript_countsFilter(search: searchTranscript_countInput"));

    let resolvers = generated("resolvers/inDiVIdual.js");
    assert!(resolvers.contains("resolvers.countTranscript_counts("));
}

#[test]
fn test_skipped_association_is_absent() {
    let schema = generated("schemas/person.js");
    assert!(schema.contains("dogsFilter("));
    assert!(!schema.contains("mentor"));
}

#[test]
fn test_migration_order() {
    let names = file_names(&Path::new(env!("OUT_DIR")).join("migrations"));
    let order: Vec<&str> = names.iter().map(|n| discriminator(n)).collect();
    assert_eq!(
        order,
        vec![
            "book.js",
            "dog.js",
            "inDiVIdual.js",
            "person.js",
            "publisher.js",
            "z-column-publisherId-to-books.js",
            "z-through-books_to_people.js",
            "z-column-personId-to-dogs.js",
        ]
    );

    let through = generated(&format!("migrations/{}", names[6]));
    assert!(through.contains("createTable('books_to_people'"));
    assert!(through.contains("bookId: {"));
    assert!(through.contains("personId: {"));
}

#[test]
fn test_batch_files() {
    let index = generated("resolvers/index.js");
    for (model, file) in [
        ("book", "book"),
        ("country", "country"),
        ("dog", "dog"),
        ("inDiVIdual", "inDiVIdual"),
        ("person", "person"),
        ("Publisher", "publisher"),
    ] {
        assert!(index.contains(&format!("const {} = require('./{}');", model, file)));
    }
    assert!(generated("schemas/commons.js").contains("enum Operator"));
    let models_index = generated("models/index.js");
    assert!(models_index.contains("associate(models)"));
    assert!(models_index.contains("models[path.basename(file, '.js')] = model;"));
}

#[test]
fn test_associated_models_resolve_to_files() {
    let models_dir = Path::new(env!("OUT_DIR")).join("models");
    assert!(generated("models/publisher.js").contains("class Publisher extends Sequelize.Model"));

    let mut referenced = 0;
    for file in file_names(&models_dir) {
        if file == "index.js" {
            continue;
        }
        let code = generated(&format!("models/{}", file));
        for (at, _) in code.match_indices("models.") {
            let key: String = code[at + "models.".len()..]
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            referenced += 1;
            assert!(
                models_dir.join(format!("{}.js", key)).exists(),
                "{} references models.{} with no models/{}.js",
                file,
                key,
                key
            );
        }
    }
    assert!(referenced > 0);
}

// ============================================================================
// Options assembly over the fixtures
// ============================================================================

#[test]
fn test_book_options_json() {
    let options = fixture_options("book.json", UnsupportedKindPolicy::Reject);
    let value = serde_json::to_value(&options).unwrap();

    assert_eq!(value["table"], "books");
    assert_eq!(value["namePlCp"], "Books");
    assert_eq!(value["storageType"], "sql");
    assert_eq!(value["arrayAttributeString"], json!(["id", "title", "genre"]));
    assert_eq!(
        value["associations"]["schemaAttributesOne"],
        json!({ "publisher": "Publisher" })
    );
    assert_eq!(value["associations"]["mutationAttributes"], "publisherId: Int");
    assert_eq!(
        value["associations"]["implicitAssociations"]["belongsTo"][0]["targetCp"],
        "Publisher"
    );
    assert_eq!(
        value["associations"]["explicitResolvers"]["hasMany"][0]["name"],
        "countries"
    );
    assert_eq!(
        value["associations"]["schemaAttributesMany"]["authors"]["targetCpPl"],
        "People"
    );
    assert!(value.get("name_pl_cp").is_none());
    assert!(value["associations"].get("mutation_attributes").is_none());
}

#[test]
fn test_options_are_idempotent() {
    for loaded in load_definitions(&fixtures_dir()).unwrap() {
        let definition = loaded.definition.unwrap();
        let first = build_options(&definition, UnsupportedKindPolicy::Skip).unwrap();
        let second = build_options(&definition, UnsupportedKindPolicy::Skip).unwrap();
        assert_eq!(first, second, "{}", loaded.path.display());
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }
}

#[test]
fn test_every_association_lands_in_one_bucket() {
    for loaded in load_definitions(&fixtures_dir()).unwrap() {
        let definition = loaded.definition.unwrap();
        let info = build_options(&definition, UnsupportedKindPolicy::Skip)
            .unwrap()
            .associations;

        assert_eq!(
            info.classified_count() + info.unsupported.len(),
            definition.associations.len(),
            "{}",
            loaded.path.display()
        );
        for name in definition.associations.keys() {
            let buckets = [
                info.implicit_associations.contains(name),
                info.explicit_resolvers.contains(name),
                info.unsupported.iter().any(|u| &u.name == name),
            ];
            assert_eq!(buckets.iter().filter(|b| **b).count(), 1, "{}", name);
        }
    }
}

#[test]
fn test_strict_policy_rejects_fixture() {
    let definition = load_definition(&fixtures_dir().join("person.json")).unwrap();
    let err = build_options(&definition, UnsupportedKindPolicy::Reject).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::UnsupportedAssociationKind { ref association, ref kind }
            if association == "mentor" && kind == "mongo_hasOne"
    ));
}

// ============================================================================
// Library runs against temporary directories
// ============================================================================

#[test]
fn test_strict_run_isolates_failed_entity() {
    let out = tempfile::tempdir().unwrap();
    let report = CodegenBuilder::new(fixtures_dir())
        .output_dir(out.path())
        .generate()
        .unwrap();

    assert_eq!(report.entity_failures.len(), 1);
    assert!(report.entity_failures[0].path.ends_with("person.json"));
    assert!(report.artifact_failures.is_empty());
    assert_eq!(
        report.entities,
        vec!["book", "country", "dog", "inDiVIdual", "Publisher"]
    );

    assert!(out.path().join("schemas/dog.js").exists());
    assert!(!out.path().join("schemas/person.js").exists());
    let index = fs::read_to_string(out.path().join("resolvers/index.js")).unwrap();
    assert!(!index.contains("person"));

    // the join table is still declared by book
    let migrations = file_names(&out.path().join("migrations"));
    assert!(migrations
        .iter()
        .any(|n| discriminator(n) == "z-through-books_to_people.js"));

    assert!(matches!(
        report.into_result(),
        Err(CodegenError::Incomplete { failures: 1 })
    ));
}

#[test]
fn test_filtered_run() {
    let out = tempfile::tempdir().unwrap();
    let report = CodegenBuilder::new(fixtures_dir())
        .output_dir(out.path())
        .include_models(&["book", "country"])
        .without_migrations()
        .generate()
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.entities, vec!["book", "country"]);
    assert_eq!(file_names(&out.path().join("schemas")), vec!["book.js", "commons.js", "country.js"]);
    assert!(!out.path().join("migrations").exists());
}

#[test]
fn test_broken_definition_does_not_stop_batch() {
    let models = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    fs::copy(fixtures_dir().join("dog.json"), models.path().join("dog.json")).unwrap();
    fs::write(models.path().join("cat.json"), r#"{"model": "cat", "storageType": "sql""#).unwrap();
    fs::write(
        models.path().join("fish.json"),
        r#"{"model": "fish", "storageType": "mongodb", "attributes": {}}"#,
    )
    .unwrap();

    let report = CodegenBuilder::new(models.path())
        .output_dir(out.path())
        .generate()
        .unwrap();

    assert_eq!(report.entities, vec!["dog"]);
    assert!(matches!(
        report.entity_failures[0].error,
        CodegenError::ParseError(_)
    ));
    assert!(matches!(
        report.entity_failures[1].error,
        CodegenError::MalformedDefinition { .. }
    ));
    assert!(out.path().join("models/dog.js").exists());
}
