use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokio::runtime::Runtime;
use traffic_dump::{format_request, format_value, InterceptorConfig, LogLine, LogSink, LoggingInterceptor};

/// Sink that drops everything, so the benchmark measures rendering only.
struct DiscardSink(bool);

impl LogSink for DiscardSink {
    fn is_debug_active(&self) -> bool {
        self.0
    }

    fn debug(&self, line: &LogLine) {
        black_box(line);
    }

    fn error(&self, message: &str, _cause: &(dyn std::error::Error + 'static)) {
        black_box(message);
    }
}

fn sample_request() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/orders?page=2&tag=a&tag=b")
        .header("host", "shop.local:8080")
        .header("content-type", "application/json; charset=utf-8")
        .header("accept", "application/json")
        .body(Body::empty())
        .unwrap()
}

fn value_formatting_benchmark(c: &mut Criterion) {
    c.bench_function("format_value", |b| {
        b.iter(|| {
            black_box(format_value(Some(black_box("application/json"))));
            black_box(format_value::<&str>(None))
        })
    });
}

fn request_dump_benchmark(c: &mut Criterion) {
    let config = InterceptorConfig::new("bench");
    let request = sample_request();

    c.bench_function("format_request", |b| {
        b.iter(|| black_box(format_request(&config, &request)))
    });
}

fn interceptor_benchmark(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    for (label, debug) in [("intercept_debug_on", true), ("intercept_debug_off", false)] {
        let interceptor = LoggingInterceptor::new(
            InterceptorConfig::new("bench"),
            Arc::new(DiscardSink(debug)),
        );
        c.bench_function(label, |b| {
            b.to_async(&rt).iter(|| async {
                interceptor
                    .handle(sample_request(), |_req| async {
                        Ok::<_, std::convert::Infallible>(Response::new(Body::empty()))
                    })
                    .await
                    .unwrap()
            })
        });
    }
}

criterion_group!(
    benches,
    value_formatting_benchmark,
    request_dump_benchmark,
    interceptor_benchmark
);
criterion_main!(benches);
