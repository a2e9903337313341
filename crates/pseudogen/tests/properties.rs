//! Cross-cutting behavior: configuration, pipeline stability, registry
//! lookups and error surfaces.

use pretty_assertions::assert_eq;
use pseudogen::middleware;
use pseudogen::{
    CSHARP, Config, GenerateError, Kind, Language, LanguageConfig, Node, PseudoType, generate,
    generate_with,
};

fn sample() -> Node {
    let total = || Node::local("egg_total", "Int");
    let add_eggs = Node::new(Kind::FunctionDefinition {
        name: "add_eggs".into(),
        params: vec![Node::local("basket", PseudoType::list("Int".into()))],
        return_type: "Int".into(),
        block: vec![
            Node::assignment(total(), Node::int(0)),
            Node::for_each(
                Node::local("egg", "Int"),
                Node::local("basket", PseudoType::list("Int".into())),
                vec![Node::assignment(
                    total(),
                    Node::binary_op("+", total(), Node::local("egg", "Int"), "Int"),
                )],
            ),
            Node::implicit_return(total()),
        ],
    });
    Node::module()
        .definition(add_eggs)
        .statement(Node::standard_call(
            "io",
            "display",
            vec![Node::string("eggs")],
            "Void",
        ))
        .build()
}

#[test]
fn generation_is_deterministic() {
    let first = generate(sample(), "csharp").unwrap();
    let second = generate(sample(), "csharp").unwrap();
    assert_eq!(first, second);
}

#[test]
fn pipeline_is_stable_on_its_own_output() {
    let profile = CSHARP.profile(&LanguageConfig::default()).unwrap();
    let once = middleware::run(sample(), &profile);
    let twice = middleware::run(once.clone(), &profile);
    assert_eq!(once, twice);
}

#[test]
fn no_trailing_whitespace() {
    let source = generate(sample(), "csharp").unwrap();
    for line in source.lines() {
        assert_eq!(line, line.trim_end());
    }
    assert!(!source.ends_with('\n'));
}

#[test]
fn indent_width_from_config() {
    let config = Config::from_toml("[csharp]\nindent = 2\n").unwrap();
    let source = generate_with(sample(), "csharp", &config).unwrap();
    assert!(source.contains("\n  static int AddEggs(List<int> basket)\n  {\n    var eggTotal = 0;"));
}

#[test]
fn tabs_from_config() {
    let config = Config::from_toml("[csharp]\ntabs = true\n").unwrap();
    let source = generate_with(sample(), "csharp", &config).unwrap();
    assert!(source.contains("\n\tpublic static void Main()\n\t{\n\t\tConsole.WriteLine(\"eggs\");"));
}

#[test]
fn naming_from_config() {
    let config = Config::from_toml(
        r#"
[csharp.naming]
normal = "snake"
function = "camel"
"#,
    )
    .unwrap();
    let source = generate_with(sample(), "csharp", &config).unwrap();
    assert!(source.contains("static int addEggs(List<int> basket)"));
    assert!(source.contains("var egg_total = 0;"));
}

#[test]
fn config_for_other_language_is_ignored() {
    let config = Config::from_toml("[python]\nindent = 2\n").unwrap();
    assert_eq!(
        generate_with(sample(), "csharp", &config).unwrap(),
        generate(sample(), "csharp").unwrap()
    );
}

#[test]
fn tree_from_json() {
    let module: Node = serde_json::from_value(serde_json::json!({
        "type": "module",
        "main": [{
            "type": "assignment",
            "target": {"type": "local", "name": "egg_count", "pseudo_type": "Int"},
            "value": {"type": "int", "value": 4, "pseudo_type": "Int"}
        }]
    }))
    .unwrap();
    let source = generate(module, "csharp").unwrap();
    assert!(source.contains("        var eggCount = 4;\n"));
}

#[test]
fn unknown_language() {
    assert_eq!(
        generate(sample(), "cobol"),
        Err(GenerateError::UnknownLanguage("cobol".into()))
    );
}

#[test]
fn registry_lookups() {
    assert_eq!(pseudogen::language("csharp").map(|l| l.extension()), Some("cs"));
    assert_eq!(
        pseudogen::language_for_extension("cs").map(|l| l.name()),
        Some("csharp")
    );
    assert!(pseudogen::languages().iter().any(|l| l.name() == "csharp"));
}

#[test]
fn undeclared_type_is_an_error() {
    let module = Node::module()
        .definition(Node::new(Kind::FunctionDefinition {
            name: "stack".into(),
            params: vec![Node::local("w", "Widget")],
            return_type: "Void".into(),
            block: vec![],
        }))
        .build();
    assert_eq!(
        generate(module, "csharp"),
        Err(GenerateError::UnknownType("Widget".into()))
    );
}

#[test]
fn declared_class_is_a_known_type() {
    let class = Node::new(Kind::ClassDefinition {
        name: "Widget".into(),
        base: None,
        attrs: vec![],
        constructor: None,
        methods: vec![],
    });
    let module = Node::module()
        .definition(class)
        .definition(Node::new(Kind::FunctionDefinition {
            name: "stack".into(),
            params: vec![Node::local("w", "Widget")],
            return_type: "Void".into(),
            block: vec![],
        }))
        .build();
    let source = generate(module, "csharp").unwrap();
    assert!(source.contains("static void Stack(Widget w)"));
}

#[test]
fn unsupported_standard_method() {
    let module = Node::module()
        .statement(Node::standard_method_call(
            Node::string("tea"),
            "teleport",
            vec![],
            "String",
        ))
        .build();
    let err = generate(module, "csharp").unwrap_err();
    assert_eq!(
        err,
        GenerateError::UnsupportedStandardCall("String.teleport".into())
    );
    assert!(err.is_structural());
}
