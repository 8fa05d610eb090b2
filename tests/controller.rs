mod common;

mod tests {
    use donation_light_composer::{
        ControllerError, EdgeSensor, ModeController, ModeEvent, ModeId, SilentAudio,
        mode::{ChaseTrailConfig, ChaseTrailMode},
    };

    use crate::common::{
        NUM_LEDS, RecordingLight, ScriptedSensor, TestController, controller, ms, set_sensor,
    };

    const BREATHING: &str = "Static Breathing";
    const WAVE: &str = "Wave Motion";

    fn breathing_then_wave() -> TestController {
        let mut controller = controller::<10>();
        controller.add_mode(ModeId::Breathing).unwrap();
        controller.add_mode(ModeId::Wave).unwrap();
        controller.setup(ms(0)).unwrap();
        controller
    }

    fn all_modes() -> TestController {
        let mut controller = controller::<10>();
        for id in ModeId::ALL {
            controller.add_mode(id).unwrap();
        }
        controller.setup(ms(0)).unwrap();
        controller
    }

    #[test]
    fn test_setup_without_modes() {
        let mut controller = controller::<10>();
        assert_eq!(controller.setup(ms(0)), Err(ControllerError::EmptyRegistry));
        assert_eq!(controller.current_mode_name(), None);
        assert!(controller.tick(ms(10)).is_empty());
        assert_eq!(
            controller.switch_to_next_mode(ms(20)),
            Err(ControllerError::EmptyRegistry)
        );
    }

    #[test]
    fn test_setup_activates_first_mode() {
        let controller = breathing_then_wave();

        assert_eq!(controller.current_index(), 0);
        assert_eq!(controller.current_mode_name(), Some(BREATHING));
        assert!(controller.modes()[0].is_active());
        assert!(!controller.modes()[1].is_active());
        assert_eq!(controller.light().setup_calls, 1);
    }

    #[test]
    fn test_registry_overflow_is_reported() {
        let mut controller = controller::<2>();
        assert_eq!(controller.add_mode(ModeId::Breathing), Ok(()));
        assert_eq!(controller.add_mode(ModeId::Wave), Ok(()));
        assert_eq!(
            controller.add_mode(ModeId::HalfSplit),
            Err(ControllerError::RegistryFull { capacity: 2 })
        );
        assert_eq!(controller.mode_count(), 2);
        assert_eq!(controller.modes()[1].id(), ModeId::Wave);
    }

    #[test]
    fn test_add_configured_mode() {
        let mut controller = controller::<10>();
        let chase = ChaseTrailMode::new(ChaseTrailConfig::default().with_tail_length(5));
        controller.add_mode(chase).unwrap();

        assert_eq!(controller.find_mode(ModeId::ChaseTrail), Some(0));
        assert_eq!(controller.find_mode(ModeId::Wave), None);
    }

    #[test]
    fn test_switch_to_next_mode_cycles() {
        let mut controller = all_modes();
        let first = controller.current_mode_name();

        for step in 1..=ModeId::ALL.len() {
            let event = controller.switch_to_next_mode(ms(step as u64)).unwrap();
            assert!(matches!(event, ModeEvent::ModeChanged { .. }));
            assert_eq!(controller.current_index(), step % ModeId::ALL.len());
        }
        assert_eq!(controller.current_mode_name(), first);
    }

    #[test]
    fn test_only_one_mode_active() {
        let mut controller = all_modes();

        for step in 0..20 {
            controller.switch_to_next_mode(ms(step)).unwrap();
            let active = controller.modes().iter().filter(|m| m.is_active()).count();
            assert_eq!(active, 1);
        }
    }

    #[test]
    fn test_switch_to_event_and_invalid_index() {
        let mut controller = all_modes();

        assert_eq!(
            controller.switch_to(3, ms(5)),
            Ok(ModeEvent::ModeChanged {
                from: BREATHING,
                to: "Half Switch",
            })
        );
        assert_eq!(
            controller.switch_to(6, ms(6)),
            Err(ControllerError::InvalidModeIndex { index: 6, count: 6 })
        );
        assert_eq!(controller.current_index(), 3);
    }

    #[test]
    fn test_single_mode_rotates_onto_itself() {
        let mut controller = controller::<10>();
        controller.add_mode(ModeId::HalfSplit).unwrap();
        controller.setup(ms(0)).unwrap();

        controller.switch_to_next_mode(ms(10)).unwrap();
        assert_eq!(controller.current_index(), 0);
        assert!(controller.modes()[0].is_active());
        assert_eq!(controller.light().setup_calls, 2);
    }

    #[test]
    fn test_donation_then_rotation() {
        let mut controller = breathing_then_wave();
        assert!(controller.tick(ms(10)).is_empty());

        set_sensor(&mut controller, true);
        let events = controller.tick(ms(20));
        assert_eq!(
            events.as_slice(),
            &[ModeEvent::Donation {
                mode: BREATHING,
                at: ms(20),
            }]
        );
        assert!(controller.modes()[0].is_effect_active());
        assert_eq!(controller.audio().donation_sounds, 1);

        assert!(controller.tick(ms(1_000)).is_empty());
        assert_eq!(controller.current_mode_name(), Some(BREATHING));

        // The effect ends on this tick; the rotation follows on the next one.
        assert!(controller.tick(ms(3_020)).is_empty());
        assert!(!controller.modes()[0].is_active());
        assert_eq!(controller.current_mode_name(), Some(BREATHING));

        let events = controller.tick(ms(3_030));
        assert_eq!(
            events.as_slice(),
            &[ModeEvent::ModeChanged {
                from: BREATHING,
                to: WAVE,
            }]
        );
        assert_eq!(controller.current_mode_name(), Some(WAVE));
        assert_eq!(controller.light().setup_calls, 2);
    }

    #[test]
    fn test_held_sensor_is_one_donation() {
        let mut controller = breathing_then_wave();
        set_sensor(&mut controller, true);

        let donations = (1..=50)
            .map(|tick| controller.tick(ms(tick * 10)))
            .flat_map(|events| events.into_iter())
            .filter(|event| matches!(event, ModeEvent::Donation { .. }))
            .count();
        assert_eq!(donations, 1);
    }

    #[test]
    fn test_donation_restarts_running_effect() {
        let mut controller = breathing_then_wave();

        set_sensor(&mut controller, true);
        controller.tick(ms(20));
        set_sensor(&mut controller, false);
        controller.tick(ms(1_990));
        set_sensor(&mut controller, true);
        controller.tick(ms(2_000));

        controller.tick(ms(3_020));
        assert!(controller.modes()[0].is_active());

        controller.tick(ms(5_000));
        assert!(!controller.modes()[0].is_active());
        assert_eq!(controller.audio().donation_sounds, 2);
    }

    #[test]
    fn test_edge_on_finished_mode_goes_to_next() {
        let mut controller = breathing_then_wave();
        set_sensor(&mut controller, true);
        controller.tick(ms(20));
        set_sensor(&mut controller, false);
        controller.tick(ms(3_020));
        assert!(!controller.modes()[0].is_active());

        set_sensor(&mut controller, true);
        let events = controller.tick(ms(3_030));
        assert_eq!(
            events.as_slice(),
            &[
                ModeEvent::ModeChanged {
                    from: BREATHING,
                    to: WAVE,
                },
                ModeEvent::Donation {
                    mode: WAVE,
                    at: ms(3_030),
                },
            ]
        );
        assert!(controller.modes()[1].is_effect_active());
    }

    #[test]
    fn test_setup_again_keeps_one_mode_active() {
        let mut controller = breathing_then_wave();
        controller.switch_to_next_mode(ms(10)).unwrap();
        controller.setup(ms(20)).unwrap();

        let active = controller.modes().iter().filter(|m| m.is_active()).count();
        assert_eq!(active, 1);
        assert_eq!(controller.current_index(), 0);
        assert!(controller.modes()[0].is_active());
        assert!(!controller.modes()[1].is_active());
    }

    #[test]
    fn test_covered_sensor_at_boot_is_not_a_donation() {
        let mut controller = controller::<10>();
        controller.add_mode(ModeId::Breathing).unwrap();
        set_sensor(&mut controller, true);
        controller.setup(ms(0)).unwrap();

        assert!(controller.tick(ms(10)).is_empty());
        assert!(!controller.modes()[0].is_effect_active());
        assert_eq!(controller.audio().donation_sounds, 0);

        set_sensor(&mut controller, false);
        controller.tick(ms(20));
        set_sensor(&mut controller, true);
        let events = controller.tick(ms(30));
        assert_eq!(
            events.as_slice(),
            &[ModeEvent::Donation {
                mode: BREATHING,
                at: ms(30),
            }]
        );
    }

    #[test]
    fn test_silent_audio() {
        let mut controller: ModeController<_, _, _> = ModeController::new(
            EdgeSensor::new(ScriptedSensor::default()),
            RecordingLight::new(NUM_LEDS),
            SilentAudio,
        );
        controller.add_mode(ModeId::RandomBlink).unwrap();
        controller.setup(ms(0)).unwrap();
        controller.sensor_mut().input_mut().set(true);

        let events = controller.tick(ms(10));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), "donation");
        assert!(controller.current_mode().is_some_and(|m| m.is_effect_active()));
    }
}
