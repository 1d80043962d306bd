use smartcar_core::{
    config::Thresholds,
    hazard::{evaluate_hazard, HazardStatus},
    sensors::SensorSnapshot,
};

fn check(temperature_c: f32, gas_level: u16) -> HazardStatus {
    let snapshot = SensorSnapshot::measured(30.0, 30.0, temperature_c, gas_level);
    evaluate_hazard(&snapshot, &Thresholds::DEFAULT)
}

#[test]
pub fn limits_are_strict(){
    assert!(!check(50.0, 400).is_hazard());
    assert!(check(50.1, 400).high_temperature);
    assert!(check(50.0, 401).harmful_gas);
}

#[test]
pub fn either_condition_is_a_hazard(){
    let temperatures = [-10.0, 0.0, 25.0, 49.9, 50.0, 50.5, 60.0, 120.0];
    let gases = [0u16, 100, 399, 400, 401, 500, 1023];
    for t in temperatures{
        for g in gases{
            let status = check(t, g);
            assert_eq!(status.is_hazard(), t > 50.0 || g > 400, "t={} g={}", t, g);
            assert_eq!(status.spray_required(), t > 50.0);
        }
    }
}

#[test]
pub fn gas_alone_does_not_call_for_water(){
    let status = check(25.0, 500);
    assert_eq!(status, HazardStatus{ high_temperature: false, harmful_gas: true });
    assert!(!status.spray_required());
}

#[test]
pub fn custom_thresholds_are_honoured(){
    let thresholds = Thresholds{ max_temperature_c: 30.0, gas_threshold: 50, ..Thresholds::DEFAULT };
    let snapshot = SensorSnapshot::measured(30.0, 30.0, 35.0, 10);
    assert!(evaluate_hazard(&snapshot, &thresholds).high_temperature);
    assert_eq!(evaluate_hazard(&snapshot, &Thresholds::DEFAULT), HazardStatus::CLEAR);
}
