//! Generate the two reference 60×60 maps and print per-set counts and crossings.
//!
//! Usage:
//!   cargo run -p fracnet --example reference_maps -- [seed]

use fracnet::api::{compare_maps, map_intersections, FractureMap, SamplingCfg, SetConfig};
use fracnet::Canvas;
use rand::{rngs::StdRng, SeedableRng};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(5);
    let canvas = Canvas {
        width: 60.0,
        height: 60.0,
    };
    let map1_sets = vec![
        SetConfig::new("set1", 3.0, 70.0, 50, 6.0),
        SetConfig::new("set2", 3.0, 140.0, 50, 9.0),
        SetConfig::new("set3", 5.0, 100.0, 50, 3.0),
        SetConfig::new("set4", 4.0, 30.0, 50, 18.0),
        SetConfig::new("set5", 9.0, 10.0, 50, 12.0),
    ];
    let map2_sets = vec![
        SetConfig::new("set1", 6.0, 55.0, 50, 4.0),
        SetConfig::new("set2", 5.0, 125.0, 50, 8.0),
        SetConfig::new("set3", 8.0, 145.0, 50, 12.0),
        SetConfig::new("set4", 7.0, 95.0, 50, 16.0),
        SetConfig::new("set5", 4.0, 5.0, 50, 20.0),
    ];

    let cfg = SamplingCfg::default();
    let mut rng = StdRng::seed_from_u64(seed);
    let maps = [
        FractureMap::generate(&mut rng, canvas, &map1_sets, &cfg),
        FractureMap::generate(&mut rng, canvas, &map2_sets, &cfg),
    ];
    let mut ok = Vec::new();
    for (k, m) in maps.into_iter().enumerate() {
        match m {
            Ok(map) => {
                for set in &map.sets {
                    println!(
                        "map{} {}: {} fractures from {} candidates",
                        k + 1,
                        set.name,
                        set.len(),
                        set.candidates
                    );
                }
                println!("map{}: {} intersections", k + 1, map_intersections(&map).count());
                ok.push(map);
            }
            Err(err) => eprintln!("map{}: {err}", k + 1),
        }
    }
    if let [a, b] = ok.as_slice() {
        if let Some(deltas) = compare_maps(a, b) {
            for d in deltas {
                println!(
                    "{}: Δcount={} Δlength={:.2} Δθ={:.3}",
                    d.a, d.count, d.mean_length, d.orientation
                );
            }
        }
    }
}
