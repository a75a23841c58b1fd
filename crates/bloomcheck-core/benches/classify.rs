use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bloomcheck_core::{CognitiveLevel, Classifier};

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let classifier = Classifier::builtin();

    let short = "What is the capital of France?";
    let long = "Do you agree that the policy was effective, and if so, how would you \
                justify your answer given the evidence presented in the article?";
    let cited = "According to the text, what factors contribute to renewable energy adoption?";
    let document = "The author argues that renewable energy adoption depends on policy. ".repeat(40);

    group.bench_function("short", |b| {
        b.iter(|| {
            classifier.classify(None, black_box(short), CognitiveLevel::Remembering)
        })
    });

    group.bench_function("long", |b| {
        b.iter(|| {
            classifier.classify(None, black_box(long), CognitiveLevel::Evaluating)
        })
    });

    group.bench_function("with_document", |b| {
        b.iter(|| {
            classifier.classify(
                Some(black_box(document.as_str())),
                black_box(cited),
                CognitiveLevel::Analyzing,
            )
        })
    });

    group.finish();
}

fn bench_question_set_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("question_set_parsing");

    for n in [10, 100, 500] {
        let toml = generate_question_set_toml(n);
        group.bench_function(format!("{n}_questions"), |b| {
            b.iter(|| {
                bloomcheck_core::question_set::parse_question_set_str(
                    black_box(&toml),
                    black_box("bench.toml".as_ref()),
                )
            })
        });
    }

    group.finish();
}

fn generate_question_set_toml(n: usize) -> String {
    let mut s = String::from(
        r#"[question_set]
id = "bench"
name = "Benchmark"
"#,
    );
    let levels = ["remember", "understand", "apply", "analyze", "evaluate", "create"];
    for i in 0..n {
        let target = levels[i % levels.len()];
        s.push_str(&format!(
            r#"
[[questions]]
id = "q{i}"
text = "Compare and contrast approach {i} with the previous one."
target = "{target}"
"#
        ));
    }
    s
}

criterion_group!(benches, bench_classify, bench_question_set_parsing);
criterion_main!(benches);
