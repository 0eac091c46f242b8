use pretty_assertions::assert_eq;
use std::fs;
use stub_index::{KindFilter, QueryFilter, StubIndex, StubKind, StubParser, StubPayload};
use tempfile::tempdir;

const DATABASE_SOURCE: &str = r#"
#include <string>

class DatabaseConnection {
public:
    bool connect();
    void disconnect();
protected:
    int port_;
};

class MySQLConnection : public DatabaseConnection {
public:
    void executeQuery(const std::string& query) override;
};

std::string buildConnectionString(const std::string& host, int port) {
    return host;
}

int global_connection_count = 0;
"#;

fn build_index(files: &[(&str, &str)]) -> StubIndex {
    let parser = StubParser::default();
    files
        .iter()
        .flat_map(|(path, code)| parser.parse_code(code, path))
        .collect()
}

#[test]
fn indexes_classes_functions_and_variables() {
    let index = build_index(&[("database.cpp", DATABASE_SOURCE)]);

    let classes: Vec<_> = index
        .query_by_kind(StubKind::Class)
        .iter()
        .map(|s| s.name.clone())
        .collect();
    assert_eq!(classes, vec!["DatabaseConnection", "MySQLConnection"]);

    let connect = index.query_by_name("connect");
    assert_eq!(connect.len(), 1);
    assert_eq!(connect[0].kind(), StubKind::Function);
    assert_eq!(connect[0].line(), 6);

    let globals = index.query(
        &QueryFilter::new()
            .name("global_connection_count")
            .kind(StubKind::Variable),
    );
    assert_eq!(globals.len(), 1);
    assert!(matches!(
        &globals[0].payload,
        StubPayload::Variable { var_type, is_const: false, is_static: false } if var_type == "int"
    ));
}

#[test]
fn composite_query_spans_files() {
    let index = build_index(&[
        ("src/net/socket.cpp", "class Socket {};\nvoid open();"),
        ("src/fs/file.cpp", "class File {};\nvoid open();"),
        ("tests/socket_test.cpp", "void open();"),
    ]);

    let opens = index.query(&QueryFilter::new().name("open"));
    assert_eq!(opens.len(), 3);

    let src_opens = index.query(&QueryFilter::new().name("open").file("src/"));
    assert_eq!(src_opens.len(), 2);

    let src_classes = index.query(&QueryFilter {
        kind: KindFilter::Exactly(StubKind::Class),
        name: None,
        file: Some("net".to_string()),
    });
    assert_eq!(src_classes.len(), 1);
    assert_eq!(src_classes[0].name, "Socket");

    assert_eq!(index.query_by_file("tests/socket_test.cpp").len(), 1);
}

#[test]
fn parse_file_reads_from_disk() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("shapes.cpp");
    fs::write(&path, "struct Point {};\ndouble area(double r);\n").unwrap();

    let stubs = StubParser::default().parse_file(&path).unwrap();
    assert_eq!(stubs.len(), 2);
    assert!(stubs.iter().all(|s| s.file_path().ends_with("shapes.cpp")));
    assert_eq!(stubs[1].name, "area");
}

#[test]
fn parse_file_reports_missing_file() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("missing.cpp");
    assert!(StubParser::default().parse_file(missing).is_err());
}
