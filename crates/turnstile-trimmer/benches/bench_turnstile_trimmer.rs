use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Map;
use turnstile_core::{Author, Mapping, Node, NodeMessage};
use turnstile_trimmer::{resolve_active_path, segment_turns, trim};

fn message(role: &str) -> NodeMessage {
    NodeMessage {
        author: Some(Author {
            role: Some(role.into()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Build a conversation of `len` alternating turns with tool helpers
/// sprinkled under roughly one node in eight.
fn generate_conversation(len: usize) -> (Mapping, String) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut mapping = Mapping::new();

    for i in 0..len {
        let role = if i % 2 == 0 { "user" } else { "assistant" };
        let id = format!("n{i}");
        let parent = (i > 0).then(|| format!("n{}", i - 1));
        let mut children = if i + 1 < len {
            vec![format!("n{}", i + 1)]
        } else {
            Vec::new()
        };
        if rng.gen_range(0..8) == 0 {
            let helper = format!("t{i}");
            children.push(helper.clone());
            mapping.insert(
                helper,
                Node {
                    message: Some(message("tool")),
                    parent: Some(id.clone()),
                    children: Vec::new(),
                    rest: Map::new(),
                },
            );
        }
        mapping.insert(
            id,
            Node {
                message: Some(message(role)),
                parent,
                children,
                rest: Map::new(),
            },
        );
    }

    (mapping, format!("n{}", len - 1))
}

fn bench_resolve_path(c: &mut Criterion) {
    for &len in &[100usize, 1000, 5000] {
        let (mapping, tip) = generate_conversation(len);
        c.bench_function(&format!("resolve_path_{len}"), |b| {
            b.iter(|| black_box(resolve_active_path(black_box(&mapping), black_box(&tip))))
        });
    }
}

fn bench_segment_turns(c: &mut Criterion) {
    for &len in &[100usize, 1000, 5000] {
        let (mapping, tip) = generate_conversation(len);
        let path = resolve_active_path(&mapping, &tip);
        c.bench_function(&format!("segment_turns_{len}"), |b| {
            b.iter(|| black_box(segment_turns(black_box(&mapping), black_box(&path))))
        });
    }
}

fn bench_trim(c: &mut Criterion) {
    for &len in &[100usize, 1000, 5000] {
        let (mapping, tip) = generate_conversation(len);
        for &budget in &[5u32, 15, 50] {
            c.bench_function(&format!("trim_{len}_budget_{budget}"), |b| {
                b.iter(|| black_box(trim(black_box(&mapping), black_box(&tip), budget)))
            });
        }
    }
}

criterion_group!(benches, bench_resolve_path, bench_segment_turns, bench_trim);
criterion_main!(benches);
