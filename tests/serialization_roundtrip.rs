use std::fmt::Debug;

use gaussgrid::core::{Execution, GridParameters, GriddingConfig, Knot};
use gaussgrid::engines::gridding::Type2Gridder;
use serde::Serialize;
use serde::de::DeserializeOwned;

fn assert_roundtrip<T>(value: &T)
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    let json = serde_json::to_vec_pretty(value).expect("json serialize");
    let from_json: T = serde_json::from_slice(&json).expect("json deserialize");
    assert_eq!(from_json, *value, "json roundtrip mismatch");
}

#[test]
fn configuration_types_roundtrip_through_json() {
    let params = GridParameters::new(6, [0.01, 0.02, 0.03], [64, 32, 16]);
    assert_roundtrip(&params);
    assert_roundtrip(&GriddingConfig::new(params));
    assert_roundtrip(&GriddingConfig::new(params).with_execution(Execution::Sequential));
    assert_roundtrip(&Knot::new(0.25, 3.0, 6.0));
}

#[test]
fn config_loads_from_handwritten_json() {
    let json = r#"{
        "params": { "half_width": 4, "tau": [0.05, 0.05, 0.05], "extents": [16, 16, 16] }
    }"#;
    let config: GriddingConfig = serde_json::from_str(json).expect("config should parse");
    assert_eq!(config.execution, Execution::Parallel);
    assert_eq!(config.params, GridParameters::isotropic(4, 0.05, 16));

    let json = r#"{
        "params": { "half_width": 2, "tau": [1.0, 1.0, 1.0], "extents": [4, 4, 4] },
        "execution": "sequential"
    }"#;
    let config: GriddingConfig = serde_json::from_str(json).expect("config should parse");
    assert_eq!(config.execution, Execution::Sequential);

    let tables = gaussgrid::core::KernelTable::gaussian_set(&config.params);
    let gridder = Type2Gridder::with_config(config, tables).expect("valid config");
    assert_eq!(gridder.config(), &config);
}

#[test]
fn loaded_config_is_still_validated() {
    let json = r#"{
        "params": { "half_width": 5, "tau": [1.0, 1.0, 1.0], "extents": [8, 8, 8] }
    }"#;
    let config: GriddingConfig = serde_json::from_str(json).expect("config should parse");
    let tables = gaussgrid::core::KernelTable::gaussian_set(&config.params);
    assert!(Type2Gridder::with_config(config, tables).is_err());
}
