use probekernel::{KernelArgs, KernelMode, Metadata, MetadataStore, OwnedImage, ParamValue, Probe};

#[test]
fn kernel_record_serializes_as_plain_object() {
    // Diamond of radius 2 around (4, 5).
    let data = (0..100usize)
        .map(|i| {
            if (i % 10).abs_diff(4) + (i / 10).abs_diff(5) <= 2 {
                1.0
            } else {
                0.0
            }
        })
        .collect();
    let mut probe = Probe::new(OwnedImage::new(data, 10, 10).unwrap());
    let mut args = KernelArgs::new();
    args.insert("radii".into(), ParamValue::Pair(2.0, 4.5));
    args.insert("center".into(), ParamValue::Pair(4.0, 5.0));
    probe.get_kernel("sigmoid", &args, false).unwrap();

    let json = serde_json::to_value(probe.metadata()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "kernel": {
                "name": "kernel",
                "entries": {
                    "center": [4.0, 5.0],
                    "mode": "sigmoid",
                    "radii": [2.0, 4.5],
                }
            }
        })
    );
}

#[test]
fn records_read_back_from_json() {
    let text = r#"{
        "name": "kernel",
        "entries": {"mode": "gaussian", "sigma": 2, "bilinear": false}
    }"#;
    let record: Metadata = serde_json::from_str(text).unwrap();
    assert_eq!(record.get("sigma"), Some(&ParamValue::Int(2)));
    assert_eq!(record.get("bilinear"), Some(&ParamValue::Bool(false)));

    let mut store = MetadataStore::new();
    store.insert(record);
    let round: MetadataStore =
        serde_json::from_str(&serde_json::to_string(&store).unwrap()).unwrap();
    assert_eq!(round, store);
}

#[test]
fn modes_use_selector_names() {
    let names: Vec<String> = KernelMode::ALL
        .iter()
        .map(|mode| serde_json::to_string(mode).unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["\"flat\"", "\"gaussian\"", "\"sigmoid\"", "\"sigmoid_log\""]
    );
    let parsed: KernelMode = serde_json::from_str("\"sigmoid_log\"").unwrap();
    assert_eq!(parsed, KernelMode::SigmoidLog);
    assert!(serde_json::from_str::<KernelMode>("\"box\"").is_err());
}
