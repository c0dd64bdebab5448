use proptest::prelude::*;
use sv_core::{Mode, Policy, SimulationParams};
use sv_request::{RequestBuilder, SimulationRequest};

fn process_strategy() -> impl Strategy<Value = (String, u32, u32)> {
    ("[A-Za-z][A-Za-z0-9_]{0,7}", 0_u32..100, 1_u32..100)
}

proptest! {
    #[test]
    fn serialize_then_split_reconstructs_fields(
        trace in any::<bool>(),
        policy_id in 1_u8..=8,
        simulation_end in 1_u32..500,
        processes in prop::collection::vec(process_strategy(), 1..=10),
    ) {
        let mode = if trace { Mode::Trace } else { Mode::Stats };
        let params = SimulationParams::new(
            mode,
            Policy::new(policy_id).unwrap(),
            simulation_end,
            processes.len(),
        )
        .unwrap();

        let mut builder = RequestBuilder::new(params);
        for (name, arrival, service) in &processes {
            builder.add_process(name, *arrival, *service).unwrap();
        }
        let text = builder.serialize().unwrap();
        prop_assert!(text.ends_with('\n'));

        let lines: Vec<&str> = text.lines().collect();
        prop_assert_eq!(lines.len(), 4 + processes.len());
        prop_assert_eq!(lines[0], mode.as_wire());
        prop_assert_eq!(lines[1], policy_id.to_string());
        prop_assert_eq!(lines[2], simulation_end.to_string());
        prop_assert_eq!(lines[3], processes.len().to_string());
        for (line, (name, arrival, service)) in lines[4..].iter().zip(&processes) {
            prop_assert_eq!(line.to_string(), format!("{},{},{}", name, arrival, service));
        }

        let decoded = SimulationRequest::from_wire(&text).unwrap();
        prop_assert_eq!(decoded, builder.build().unwrap());
    }

    #[test]
    fn blank_names_never_advance(spaces in "[ \t]{0,6}", count in 1_usize..=10) {
        let params =
            SimulationParams::new(Mode::Trace, Policy::new(3).unwrap(), 10, count).unwrap();
        let mut builder = RequestBuilder::new(params);
        prop_assert!(builder.add_process(&spaces, 0, 1).is_err());
        prop_assert_eq!(builder.count(), 0);
    }
}
