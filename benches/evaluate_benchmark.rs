use criterion::{Criterion, black_box, criterion_group, criterion_main};
use sci_calc::engine::{evaluate, parse_expression};
use sci_calc::eval::eval_ast;

const EXPRESSIONS: &[&str] = &[
    "2+3*4",
    "sin(45)+cos(30)",
    "2^3+log(100)",
    "sqrt(3*3+4*4)*exp(ln(2))-tan(30)/2",
    "((((1+2)*3-4)/5)^2+sin(cos(tan(10))))",
];

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    group.bench_function("parse_and_evaluate", |b| {
        b.iter(|| {
            for expr in EXPRESSIONS {
                black_box(evaluate(black_box(expr)).unwrap());
            }
        });
    });

    group.bench_function("parse_only", |b| {
        b.iter(|| {
            for expr in EXPRESSIONS {
                black_box(parse_expression(black_box(expr)).unwrap());
            }
        });
    });

    let parsed: Vec<_> = EXPRESSIONS
        .iter()
        .map(|expr| parse_expression(expr).unwrap())
        .collect();
    group.bench_function("evaluate_parsed", |b| {
        b.iter(|| {
            for ast in &parsed {
                black_box(eval_ast(black_box(ast)).unwrap());
            }
        });
    });

    group.bench_function("long_sum", |b| {
        let expr = vec!["1.5"; 1000].join("+");
        b.iter(|| black_box(evaluate(black_box(&expr)).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_evaluate);
criterion_main!(benches);
