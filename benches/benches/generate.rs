use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pseudogen::{CSHARP, Kind, Language, LanguageConfig, Node, PseudoType, generate, render_module};

/// A module with `n` small functions, each looping over a list.
fn module(n: usize) -> Node {
    let mut builder = Node::module();
    for i in 0..n {
        let items = || Node::local("items", PseudoType::list("Int".into()));
        let total = || Node::local("total", "Int");
        builder = builder.definition(Node::new(Kind::FunctionDefinition {
            name: format!("sum_{i}"),
            params: vec![items()],
            return_type: "Int".into(),
            block: vec![
                Node::assignment(total(), Node::int(0)),
                Node::for_each(
                    Node::local("item", "Int"),
                    items(),
                    vec![Node::assignment(
                        total(),
                        Node::binary_op("+", total(), Node::local("item", "Int"), "Int"),
                    )],
                ),
                Node::implicit_return(total()),
            ],
        }));
        builder = builder.statement(Node::standard_call(
            "io",
            "display",
            vec![Node::call(
                Node::local(format!("sum_{i}"), "Int"),
                vec![Node::typed(
                    Kind::List {
                        elements: vec![Node::int(1), Node::int(2)],
                    },
                    PseudoType::list("Int".into()),
                )],
                "Int",
            )],
            "Void",
        ));
    }
    builder.build()
}

fn bench_generate(c: &mut Criterion) {
    let small = module(10);
    let large = module(500);

    c.bench_function("generate_csharp_10_functions", |b| {
        b.iter(|| generate(black_box(small.clone()), "csharp"))
    });

    c.bench_function("generate_csharp_500_functions", |b| {
        b.iter(|| generate(black_box(large.clone()), "csharp"))
    });

    let profile = CSHARP
        .profile(&LanguageConfig::default())
        .expect("csharp profile");
    c.bench_function("render_module_prebuilt_profile", |b| {
        b.iter(|| render_module(black_box(small.clone()), &profile))
    });

    let json = serde_json::to_string(&large).expect("serialize");
    c.bench_function("json_to_csharp_500_functions", |b| {
        b.iter(|| {
            let tree: Node = serde_json::from_str(black_box(&json)).expect("deserialize");
            generate(tree, "csharp")
        })
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
