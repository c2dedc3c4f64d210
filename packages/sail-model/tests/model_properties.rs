//! Behavioural properties of the speed model, checked through the public API.

use std::sync::Arc;
use std::thread;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sail_model::envelope::direction_factor;
use sail_model::{
    coarse_error_v_opt, BaseModel, BoatModel, ModelConstants, ModelVariant, OptimalController,
    PlaningModel, Sail, SailTrim, SpeedModel, WindCondition,
};

fn wind(speed: f64, dir: f64) -> WindCondition {
    WindCondition::new(speed, dir).unwrap()
}

#[test]
fn resultant_speed_is_deterministic_and_non_negative() {
    let mut rng = StdRng::seed_from_u64(7);
    for variant in [ModelVariant::Base, ModelVariant::Planing] {
        let model = BoatModel::reference(variant);
        for _ in 0..500 {
            let w = wind(rng.gen_range(0.0..18.0), rng.gen_range(0.0..=180.0));
            let t = SailTrim::new(rng.gen_range(0.0..=90.0), rng.gen_range(0.0..=90.0));
            let a = model.resultant_speed(w, t).unwrap();
            let b = model.resultant_speed(w, t).unwrap();
            assert_eq!(a, b);
            assert!(a >= 0.0, "negative speed {a} at {w:?} {t:?}");
        }
    }
}

#[test]
fn direction_factor_is_continuous_at_breakpoints() {
    let c = ModelConstants::default();
    let expected = [(40.0, 0.0), (50.0, 0.6), (90.0, 1.0)];
    for (edge, value) in expected {
        let left = direction_factor(&c, edge - 1e-7).unwrap();
        let right = direction_factor(&c, edge + 1e-7).unwrap();
        assert!((left - value).abs() < 1e-5, "left limit at {edge}: {left}");
        assert!((right - value).abs() < 1e-5, "right limit at {edge}: {right}");
        assert!((direction_factor(&c, edge).unwrap() - value).abs() < 1e-12);
    }
}

#[test]
fn sail_pos_factor_is_bounded_and_one_at_optimum() {
    let mut rng = StdRng::seed_from_u64(11);
    for variant in [ModelVariant::Base, ModelVariant::Planing] {
        let model = BoatModel::reference(variant);
        for _ in 0..500 {
            let w = wind(rng.gen_range(0.0..=18.0), rng.gen_range(0.0..=180.0));
            for sail in [Sail::Main, Sail::Jib] {
                let pos = rng.gen_range(0.0..=90.0);
                let f = model.sail_pos_factor(pos, w, sail).unwrap();
                assert!((0.0..=1.0).contains(&f));

                let opt = model.opt_pos(w, sail).unwrap();
                if opt <= w.wind_dir() {
                    assert_eq!(model.sail_pos_factor(opt, w, sail).unwrap(), 1.0);
                }
            }
        }
    }
}

#[test]
fn peek_optimal_beats_sampled_trims() {
    let mut rng = StdRng::seed_from_u64(42);
    for variant in [ModelVariant::Base, ModelVariant::Planing] {
        let model = BoatModel::reference(variant);
        for speed in [2.0, 6.0, 10.0, 14.0] {
            for dir in [30.0, 60.0, 90.0, 120.0, 150.0] {
                let w = wind(speed, dir);
                let opt = model.peek_optimal(w).unwrap();
                assert_eq!(model.resultant_speed(w, opt.trim()).unwrap(), opt.speed);
                for _ in 0..64 {
                    let t = SailTrim::new(rng.gen_range(0.0..=90.0), rng.gen_range(0.0..=90.0));
                    let s = model.resultant_speed(w, t).unwrap();
                    assert!(opt.speed >= s, "{variant} {w:?}: {t:?} gives {s} > {}", opt.speed);
                }
            }
        }
    }
}

#[test]
fn planing_boost_gating() {
    let m = PlaningModel::default();

    let w = wind(10.0, 70.0);
    let opt = m.peek_optimal(w).unwrap();
    for (dm, dj) in [(1.0, 1.0), (-1.0, 1.0), (1.0, -1.0), (-1.0, -1.0)] {
        let boost = m.planing_boost(w, SailTrim::new(opt.main + dm, opt.jib + dj)).unwrap();
        assert!(boost > 0.0);
    }

    let light = wind(5.0, 70.0);
    assert_eq!(m.planing_boost(light, m.peek_optimal(light).unwrap().trim()).unwrap(), 0.0);

    let pinching = wind(10.0, 40.0);
    assert_eq!(m.planing_boost(pinching, m.peek_optimal(pinching).unwrap().trim()).unwrap(), 0.0);
}

#[test]
fn backed_sail_gives_no_drive() {
    let m = BaseModel::default();
    assert_eq!(m.sail_pos_factor(50.0, wind(10.0, 30.0), Sail::Main).unwrap(), 0.0);
}

#[test]
fn beam_reach_scenario_matches_peek_optimal() {
    let m = BaseModel::default();
    let w = wind(10.0, 90.0);
    let main = m.opt_pos(w, Sail::Main).unwrap();
    let jib = m.opt_pos(w, Sail::Jib).unwrap();
    assert_eq!(m.resultant_speed(w, SailTrim::new(main, jib)).unwrap(), m.peek_optimal(w).unwrap().speed);
}

#[test]
fn optimal_controller_is_error_free() {
    let m = BaseModel::default();
    let summary = coarse_error_v_opt(&m, &OptimalController::new(&m)).unwrap();
    assert_eq!((summary.mse, summary.mean_abs_error), (0.0, 0.0));
}

#[test]
fn out_of_domain_input_is_rejected() {
    let m = BoatModel::reference(ModelVariant::Planing);
    assert!(WindCondition::new(10.0, 200.0).is_err());
    assert!(m.resultant_speed(wind(10.0, 90.0), SailTrim::new(10.0, -1.0)).is_err());
    assert!(m.resultant_speed(wind(18.5, 90.0), SailTrim::new(45.0, 45.0)).is_err());
}

#[test]
fn concurrent_calls_agree() {
    let model = Arc::new(BoatModel::reference(ModelVariant::Planing));
    let reference: Vec<f64> = (0..=180)
        .map(|d| model.peek_optimal(wind(12.5, d as f64)).unwrap().speed)
        .collect();
    let reference = Arc::new(reference);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let model = Arc::clone(&model);
            let reference = Arc::clone(&reference);
            thread::spawn(move || {
                for _ in 0..20 {
                    for d in 0..=180 {
                        let s = model.peek_optimal(wind(12.5, d as f64)).unwrap().speed;
                        assert_eq!(s, reference[d]);
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
