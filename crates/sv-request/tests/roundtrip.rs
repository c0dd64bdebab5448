use sv_core::Mode;
use sv_request::{RequestError, RequestFile, ValidationError, load_yaml, save_yaml};

const TWO_PROCESSES: &str = r#"
mode: trace
policy: 2
quantum: 4
simulation_end: 20
processes:
  - { name: A, arrival: 0, service: 3 }
  - { name: B, arrival: 2, service: 6 }
"#;

#[test]
fn yaml_request_loads_through_builder() {
    let file: RequestFile = serde_yaml::from_str(TWO_PROCESSES).unwrap();
    let request = file.into_request().unwrap();

    assert_eq!(request.mode(), Mode::Trace);
    assert_eq!(request.policy().as_wire(), "2-4");
    assert_eq!(request.process_count(), 2);
    assert_eq!(request.serialize(), "trace\n2-4\n20\n2\nA,0,3\nB,2,6\n");
}

#[test]
fn roundtrip_yaml_file() {
    let file: RequestFile = serde_yaml::from_str(TWO_PROCESSES).unwrap();
    let request = file.into_request().unwrap();

    let path = std::env::temp_dir().join("sv_request_roundtrip.yaml");
    save_yaml(&path, &request).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(request, loaded);
}

#[test]
fn declared_count_must_match_listed_processes() {
    let mut file: RequestFile = serde_yaml::from_str(TWO_PROCESSES).unwrap();
    file.process_count = Some(3);
    assert!(matches!(
        file.clone().into_request(),
        Err(RequestError::Validation(ValidationError::Incomplete {
            have: 2,
            expected: 3
        }))
    ));

    file.process_count = Some(1);
    assert!(matches!(
        file.into_request(),
        Err(RequestError::Validation(ValidationError::CapacityReached {
            expected: 1
        }))
    ));
}

#[test]
fn blank_name_in_file_is_rejected() {
    let yaml = r#"
mode: stats
policy: 1
simulation_end: 10
processes:
  - { name: "  ", arrival: 0, service: 3 }
"#;
    let file: RequestFile = serde_yaml::from_str(yaml).unwrap();
    assert!(matches!(
        file.into_request(),
        Err(RequestError::Validation(ValidationError::EmptyName))
    ));
}

#[test]
fn quantum_on_fcfs_is_rejected() {
    let yaml = "mode: stats\npolicy: 1\nquantum: 2\nsimulation_end: 10\nprocesses: []\n";
    let file: RequestFile = serde_yaml::from_str(yaml).unwrap();
    assert!(matches!(
        file.into_request(),
        Err(RequestError::Validation(ValidationError::Params(_)))
    ));
}
