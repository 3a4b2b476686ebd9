use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const STREAM_WRAPPER: &str = include_str!("../tests/fixtures/bug67626.php");
const ABSTRACT_CLASSES: &str = include_str!("../tests/fixtures/abstract_classes.php");

fn large_class_source() -> String {
    let mut out = String::from("<?php\nabstract class Large extends Base implements A, B {\n");
    for i in 0..500u32 {
        out.push_str(&format!(
            "    const C{i} = {i};\n    protected static $p{i} = [{i}, 'x'];\n    final public function m{i}($x, $y = null) {{ return $this->p{i}->get($x) + {i}; }}\n    abstract protected function a{i}();\n"
        ));
    }
    out.push_str("}\n");
    out
}

fn bench_parse(c: &mut Criterion) {
    let large = large_class_source();

    let mut group = c.benchmark_group("parse");
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));
    group.sample_size(20);

    for (id, src) in [
        ("stream_wrapper", STREAM_WRAPPER),
        ("abstract_classes", ABSTRACT_CLASSES),
        ("large_class", large.as_str()),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(id), src, |b, src| {
            b.iter(|| black_box(phpobj_parser::parse(black_box(src))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
