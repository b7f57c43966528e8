#![cfg(feature = "serde")]


use std::{fs, path::Path};

use example_document::ExampleDocument;
use realtime_ot::{OperationTransformer, TransformationFunctionRegistry, transform};
use serde::Deserialize;

#[test]
fn test_with_examples() {
    for doc in &get_all_documents() {
        println!("Testing with example {}", doc.name());

        let (server, client) = transform(doc.server(), doc.client())
            .unwrap_or_else(|error| panic!("Failed to transform {}: {error}", doc.name()));

        doc.assert_transformed(&server, &client);

        // the server applied its own operation first, the client its own
        doc.assert_converges(&doc.server(), &client);
        doc.assert_converges(&doc.client(), &server);
    }
}

#[test]
fn test_examples_with_own_registry() {
    let registry = TransformationFunctionRegistry::new().unwrap();
    let transformer = OperationTransformer::new(&registry);

    for doc in &get_all_documents() {
        let (server, client) = transformer.transform(doc.server(), doc.client()).unwrap();
        doc.assert_transformed(&server, &client);
    }
}

#[test]
fn test_transform_is_deterministic() {
    for doc in &get_all_documents() {
        assert_eq!(
            transform(doc.server(), doc.client()),
            transform(doc.server(), doc.client()),
            "{}",
            doc.name()
        );
    }
}

fn get_all_documents() -> Vec<ExampleDocument> {
    let examples_dir = Path::new("tests/examples");
    let entries = fs::read_dir(examples_dir)
        .expect("Failed to read examples directory")
        .collect::<Vec<_>>();

    let mut documents = Vec::new();

    for entry in entries {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();

        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("yml") {
            let file = fs::File::open(&path).expect("Failed to open example file");
            for document in serde_yaml::Deserializer::from_reader(file) {
                let doc =
                    ExampleDocument::deserialize(document).expect("Failed to deserialize document");
                documents.push(doc);
            }
        }
    }

    assert!(!documents.is_empty(), "No examples found");

    documents
}
