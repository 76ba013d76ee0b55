//! Store Performance Benchmarks
//!
//! - Store throughput with and without listeners
//! - Concurrent senders serialized through one store
//!
//! Run with: `cargo bench`

#![allow(missing_docs)] // Benchmarks don't need extensive docs
#![allow(clippy::expect_used)] // Benchmarks can use expect for setup

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use statecraft_core::{action::Action, reducer::Reducer};
use statecraft_runtime::{Store, StoreConfig};

#[derive(Clone, Debug)]
struct BenchState {
    counter: i64,
    data: Vec<u8>, // For testing state size impact
}

#[derive(Clone, Debug)]
enum BenchAction {
    Increment,
    NoOp,
}

impl Action for BenchAction {
    fn kind(&self) -> &'static str {
        match self {
            Self::Increment => "INCREMENT",
            Self::NoOp => "NO_OP",
        }
    }
}

#[derive(Clone)]
struct BenchReducer;

impl Reducer for BenchReducer {
    type State = BenchState;
    type Action = BenchAction;

    fn initial_state(&self) -> BenchState {
        BenchState {
            counter: 0,
            data: vec![0; 1024], // 1KB of data
        }
    }

    fn reduce(&self, state: &BenchState, action: BenchAction) -> BenchState {
        match action {
            BenchAction::Increment => BenchState {
                counter: state.counter + 1,
                data: state.data.clone(),
            },
            BenchAction::NoOp => state.clone(),
        }
    }
}

/// Benchmark Store throughput (actions/sec)
fn benchmark_store_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_throughput");
    group.throughput(Throughput::Elements(1));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build runtime");

    group.bench_function("send_action", |b| {
        let store = Store::new(BenchReducer);

        b.to_async(&runtime).iter(|| async {
            let _ = store.send(black_box(BenchAction::Increment)).await;
        });
    });

    group.bench_function("send_noop", |b| {
        let store = Store::new(BenchReducer);

        b.to_async(&runtime).iter(|| async {
            let _ = store.send(black_box(BenchAction::NoOp)).await;
        });
    });

    group.bench_function("send_with_4_listeners", |b| {
        let store = Store::with_config(
            BenchReducer.initial_state(),
            BenchReducer,
            &StoreConfig::new(1024),
        )
        .expect("valid config");
        // Listeners never read; the channel overwrites old transitions
        let _listeners: Vec<_> = (0..4).map(|_| store.subscribe()).collect();

        b.to_async(&runtime).iter(|| async {
            let _ = store.send(black_box(BenchAction::Increment)).await;
        });
    });

    group.finish();
}

/// Benchmark concurrent Store access
fn benchmark_concurrent_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent");
    group.throughput(Throughput::Elements(10));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .expect("Failed to build runtime");

    group.bench_function("10_concurrent_sends", |b| {
        let store = Store::new(BenchReducer);

        b.to_async(&runtime).iter(|| async {
            let handles: Vec<_> = (0..10)
                .map(|_| {
                    let store = store.clone();
                    tokio::spawn(async move {
                        let _ = store.send(BenchAction::Increment).await;
                    })
                })
                .collect();

            for handle in handles {
                handle.await.expect("Task failed");
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_store_throughput,
    benchmark_concurrent_access,
);
criterion_main!(benches);
