// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the smart plug model using an in-memory device.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use parking_lot::Mutex;
use serde_json::{Map, Value, json};
use smartplug_lib::diagnostics::{Diagnostic, MemoryDiagnostics};
use smartplug_lib::error::{CommunicationError, Error, ParseError, ValueError};
use smartplug_lib::protocol::{CommandDispatcher, CommandResponse, DeviceSession};
use smartplug_lib::{PlugConfig, SmartPlug, SmartPlugBuilder, SwitchState};

// ============================================================================
// Mock device
// ============================================================================

type Sent = (String, String, Map<String, Value>);

/// In-memory plug whose system info can be swapped between reads.
#[derive(Default)]
struct MockPlug {
    sys_info: Mutex<Map<String, Value>>,
    sent: Mutex<Vec<Sent>>,
    fetches: Mutex<usize>,
    session_error: Mutex<Option<CommunicationError>>,
    dispatch_error: Mutex<Option<CommunicationError>>,
}

impl MockPlug {
    fn new(info: Value) -> Arc<Self> {
        let mock = Self::default();
        mock.set_info(info);
        Arc::new(mock)
    }

    fn set_info(&self, info: Value) {
        *self.sys_info.lock() = info.as_object().cloned().unwrap_or_default();
    }

    fn set_relay(&self, raw: Value) {
        self.sys_info.lock().insert("relay_state".to_string(), raw);
    }

    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().clone()
    }

    fn fetches(&self) -> usize {
        *self.fetches.lock()
    }
}

impl DeviceSession for MockPlug {
    fn fetch_system_info(&self) -> Result<Map<String, Value>, CommunicationError> {
        *self.fetches.lock() += 1;
        if let Some(err) = self.session_error.lock().clone() {
            return Err(err);
        }
        Ok(self.sys_info.lock().clone())
    }
}

impl CommandDispatcher for MockPlug {
    fn dispatch(
        &self,
        module: &str,
        command: &str,
        parameters: &Map<String, Value>,
    ) -> Result<CommandResponse, CommunicationError> {
        if let Some(err) = self.dispatch_error.lock().clone() {
            return Err(err);
        }
        self.sent
            .lock()
            .push((module.to_string(), command.to_string(), parameters.clone()));
        Ok(CommandResponse::new(json!({"err_code": 0})))
    }
}

fn hs110() -> Value {
    json!({
        "sw_ver": "1.2.5 Build 171213 Rel.101523",
        "model": "HS110(EU)",
        "alias": "Desk lamp",
        "relay_state": 1,
        "on_time": 3600,
        "led_off": 0,
        "feature": "TIM:ENE",
    })
}

fn connect(mock: &Arc<MockPlug>) -> (SmartPlug<Arc<MockPlug>, Arc<MockPlug>>, Arc<MemoryDiagnostics>) {
    let sink = Arc::new(MemoryDiagnostics::new());
    let plug = SmartPlug::builder("192.168.1.105")
        .with_diagnostics(sink.clone())
        .build(Arc::clone(mock), Arc::clone(mock))
        .unwrap();
    (plug, sink)
}

fn params(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

// ============================================================================
// Switch state
// ============================================================================

mod switch_state {
    use super::*;

    #[test]
    fn relay_zero_is_off_and_one_is_on() {
        let mock = MockPlug::new(hs110());
        let (plug, sink) = connect(&mock);

        assert_eq!(plug.state().unwrap(), SwitchState::On);
        mock.set_relay(json!(0));
        assert_eq!(plug.state().unwrap(), SwitchState::Off);
        assert!(sink.is_empty());
    }

    #[test]
    fn float_and_boolean_relay_values_decode_by_value() {
        let mock = MockPlug::new(hs110());
        let (plug, sink) = connect(&mock);

        for (raw, expected) in [
            (json!(1.0), SwitchState::On),
            (json!(true), SwitchState::On),
            (json!(0.0), SwitchState::Off),
            (json!(false), SwitchState::Off),
        ] {
            mock.set_relay(raw.clone());
            assert_eq!(plug.state().unwrap(), expected, "relay_state {raw}");
            assert_eq!(plug.is_on().unwrap(), expected == SwitchState::On);
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn other_relay_values_are_unknown_and_reported() {
        let mock = MockPlug::new(hs110());
        let (plug, sink) = connect(&mock);

        for raw in [json!(2), json!(-1), json!("1"), json!(null), json!(0.5)] {
            mock.set_relay(raw.clone());
            assert_eq!(plug.state().unwrap(), SwitchState::Unknown);
            assert_eq!(
                sink.take(),
                vec![Diagnostic::UnknownRelayState { raw }]
            );
        }
    }

    #[test]
    fn is_on_follows_truthiness() {
        let mock = MockPlug::new(hs110());
        let (plug, sink) = connect(&mock);

        let cases = [
            (json!(0), false),
            (json!(1), true),
            (json!(2), true),
            (json!(-1), true),
            (json!(null), false),
        ];
        for (raw, expected) in cases {
            mock.set_relay(raw);
            assert_eq!(plug.is_on().unwrap(), expected);
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn is_on_and_state_disagree_on_unknown() {
        let mock = MockPlug::new(hs110());
        mock.set_relay(json!(3));
        let (plug, _) = connect(&mock);

        assert_eq!(plug.state().unwrap(), SwitchState::Unknown);
        assert!(plug.is_on().unwrap());
    }

    #[test]
    fn repeated_reads_agree_on_unchanged_snapshot() {
        let mock = MockPlug::new(hs110());
        let (plug, _) = connect(&mock);

        let first = plug.state().unwrap();
        let second = plug.state().unwrap();
        assert_eq!(first, second);
        assert_eq!(mock.fetches(), 2);
    }

    #[test]
    fn state_follows_device_not_last_write() {
        let mock = MockPlug::new(hs110());
        mock.set_relay(json!(0));
        let (plug, _) = connect(&mock);

        plug.set_state("ON").unwrap();
        assert_eq!(plug.state().unwrap(), SwitchState::Off);

        mock.set_relay(json!(1));
        assert_eq!(plug.state().unwrap(), SwitchState::On);
    }
}

// ============================================================================
// Setting the switch
// ============================================================================

mod set_state {
    use super::*;

    #[test]
    fn on_variants_dispatch_state_one() {
        let mock = MockPlug::new(hs110());
        let (plug, _) = connect(&mock);

        for value in ["on", "ON", "oN"] {
            plug.set_state(value).unwrap();
        }

        let sent = mock.sent();
        assert_eq!(sent.len(), 3);
        for (module, command, parameters) in sent {
            assert_eq!(module, "system");
            assert_eq!(command, "set_relay_state");
            assert_eq!(parameters, params(json!({"state": 1})));
        }
    }

    #[test]
    fn off_variants_dispatch_state_zero() {
        let mock = MockPlug::new(hs110());
        let (plug, _) = connect(&mock);

        for value in ["off", "OFF", "Off"] {
            plug.set_state(value.to_string()).unwrap();
        }

        for (_, _, parameters) in mock.sent() {
            assert_eq!(parameters, params(json!({"state": 0})));
        }
        assert_eq!(mock.sent().len(), 3);
    }

    #[test]
    fn number_is_rejected_without_dispatch() {
        let mock = MockPlug::new(hs110());
        let (plug, _) = connect(&mock);

        let err = plug.set_state(42).unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::NotAString { found: "number", .. })
        ));
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "invalid argument: switch state must be a string, not number 42"
        );
        assert!(mock.sent().is_empty());
    }

    #[test]
    fn unknown_string_is_rejected_without_dispatch() {
        let mock = MockPlug::new(hs110());
        let (plug, _) = connect(&mock);

        let err = plug.set_state("MAYBE").unwrap_err();
        assert!(matches!(
            err,
            Error::Value(ValueError::InvalidState(ref s)) if s == "MAYBE"
        ));
        assert_eq!(err.to_string(), "invalid argument: invalid switch state: MAYBE");

        assert!(plug.set_state("unknown").is_err());
        assert!(plug.set_state(json!(null)).is_err());
        assert!(mock.sent().is_empty());
    }

    #[test]
    fn validation_happens_before_session_access() {
        let mock = MockPlug::new(hs110());
        let (plug, _) = connect(&mock);

        let _ = plug.set_state("MAYBE");
        plug.set_state("on").unwrap();
        assert_eq!(mock.fetches(), 0);
    }

    #[test]
    fn dispatcher_error_is_propagated_unchanged() {
        let mock = MockPlug::new(hs110());
        let rejected = CommunicationError::Rejected {
            code: -1,
            message: "module not support".to_string(),
        };
        *mock.dispatch_error.lock() = Some(rejected.clone());
        let (plug, _) = connect(&mock);

        let err = plug.set_state("on").unwrap_err();
        assert!(matches!(err, Error::Communication(ref e) if *e == rejected));

        let err = plug.turn_off().unwrap_err();
        assert!(matches!(err, Error::Communication(ref e) if *e == rejected));
    }

    #[test]
    fn turn_on_and_off() {
        let mock = MockPlug::new(hs110());
        let (plug, _) = connect(&mock);

        plug.turn_on().unwrap();
        plug.turn_off().unwrap();

        let sent = mock.sent();
        assert_eq!(sent[0].2, params(json!({"state": 1})));
        assert_eq!(sent[1].2, params(json!({"state": 0})));
    }
}

// ============================================================================
// Features
// ============================================================================

mod features {
    use super::*;

    #[test]
    fn known_features() {
        let mock = MockPlug::new(hs110());
        mock.sys_info
            .lock()
            .insert("feature".to_string(), json!("ENE:TIM"));
        let (plug, sink) = connect(&mock);

        assert_eq!(plug.features().unwrap().codes(), vec!["ENE", "TIM"]);
        assert!(plug.has_feature("ENE").unwrap());
        assert!(plug.has_emeter().unwrap());
        assert!(sink.is_empty());
    }

    #[test]
    fn unknown_feature_is_kept_and_reported_once() {
        let mock = MockPlug::new(hs110());
        mock.sys_info
            .lock()
            .insert("feature".to_string(), json!("ENE:XYZ"));
        let (plug, sink) = connect(&mock);

        assert_eq!(plug.features().unwrap().codes(), vec!["ENE", "XYZ"]);
        assert_eq!(
            sink.take(),
            vec![Diagnostic::UnknownFeature {
                code: "XYZ".to_string(),
                model: "HS110(EU)".to_string(),
            }]
        );

        assert!(plug.has_feature("XYZ").unwrap());
        assert!(!plug.has_feature("TIM").unwrap());
        assert!(plug.has_emeter().unwrap());
    }

    #[test]
    fn timer_only_device_has_no_emeter() {
        let mock = MockPlug::new(json!({"feature": "TIM", "model": "HS100(US)"}));
        let (plug, _) = connect(&mock);
        assert!(!plug.has_emeter().unwrap());
        assert!(plug.has_feature("TIM").unwrap());
    }

    #[test]
    fn non_string_feature_field_is_a_parse_error() {
        let mock = MockPlug::new(json!({"feature": 7}));
        let (plug, _) = connect(&mock);
        assert!(matches!(
            plug.features(),
            Err(Error::Parse(ParseError::InvalidValue { .. }))
        ));
    }
}

// ============================================================================
// LED
// ============================================================================

mod led {
    use super::*;

    #[test]
    fn led_state_is_inverted_led_off() {
        let mock = MockPlug::new(hs110());
        let (plug, _) = connect(&mock);

        assert!(plug.led().unwrap());
        mock.sys_info.lock().insert("led_off".to_string(), json!(1));
        assert!(!plug.led().unwrap());
    }

    #[test]
    fn set_led_dispatches_negation() {
        let mock = MockPlug::new(hs110());
        let (plug, _) = connect(&mock);

        plug.set_led(true).unwrap();
        plug.set_led(false).unwrap();

        let sent = mock.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, "system");
        assert_eq!(sent[0].1, "set_led_off");
        assert_eq!(sent[0].2, params(json!({"off": 0})));
        assert_eq!(sent[1].2, params(json!({"off": 1})));
    }

    #[test]
    fn missing_led_field() {
        let mock = MockPlug::new(json!({"relay_state": 1}));
        let (plug, _) = connect(&mock);
        assert!(matches!(
            plug.led(),
            Err(Error::Parse(ParseError::MissingField(ref f))) if f == "led_off"
        ));
    }
}

// ============================================================================
// Uptime and session failures
// ============================================================================

mod uptime {
    use super::*;

    #[test]
    fn on_since_is_one_hour_ago() {
        let mock = MockPlug::new(hs110());
        let (plug, _) = connect(&mock);

        let expected = Utc::now() - TimeDelta::hours(1);
        let since = plug.on_since().unwrap();
        let drift = (since - expected).num_milliseconds().abs();
        assert!(drift < 2000, "drift of {drift} ms");
    }

    #[test]
    fn on_since_keeps_fractional_seconds() {
        let mock = MockPlug::new(json!({"on_time": 90.5}));
        let (plug, _) = connect(&mock);

        let before = Utc::now();
        let since = plug.on_since().unwrap();
        let after = Utc::now();
        assert!(since >= before - TimeDelta::milliseconds(90_500));
        assert!(since <= after - TimeDelta::milliseconds(90_500));
    }

    #[test]
    fn on_since_just_switched_on() {
        let mock = MockPlug::new(json!({"on_time": 0}));
        let (plug, _) = connect(&mock);

        let before = Utc::now();
        let since = plug.on_since().unwrap();
        assert!(since >= before);
        assert!(since <= Utc::now());
    }

    #[test]
    fn session_error_is_propagated_unchanged() {
        let mock = MockPlug::new(hs110());
        *mock.session_error.lock() = Some(CommunicationError::Timeout(5000));
        let (plug, sink) = connect(&mock);

        for result in [
            plug.state().map(|_| ()),
            plug.is_on().map(|_| ()),
            plug.features().map(|_| ()),
            plug.led().map(|_| ()),
            plug.on_since().map(|_| ()),
        ] {
            assert!(matches!(
                result,
                Err(Error::Communication(CommunicationError::Timeout(5000)))
            ));
        }
        assert!(sink.is_empty());
        assert_eq!(mock.fetches(), 5);
    }
}

// ============================================================================
// Configuration
// ============================================================================

mod configuration {
    use super::*;

    #[test]
    fn builder_from_json_config() {
        let config = PlugConfig::from_json(
            r#"{"address": "10.0.0.12", "emeter": {"module": "emeter", "units": true}}"#,
        )
        .unwrap();

        let mock = MockPlug::new(hs110());
        let plug = SmartPlugBuilder::from_config(config)
            .build(Arc::clone(&mock), Arc::clone(&mock))
            .unwrap();

        assert_eq!(plug.address(), "10.0.0.12");
        assert!(plug.emeter().units);
        assert_eq!(plug.alias().unwrap().as_deref(), Some("Desk lamp"));
        assert_eq!(mock.fetches(), 1);
    }

    #[test]
    fn default_diagnostics_sink_is_tracing() {
        let mock = MockPlug::new(json!({"relay_state": 9}));
        let plug = SmartPlug::builder("plug.lan")
            .build(Arc::clone(&mock), Arc::clone(&mock))
            .unwrap();
        assert_eq!(plug.state().unwrap(), SwitchState::Unknown);
    }

    #[test]
    fn raw_snapshot_access() {
        let mock = MockPlug::new(hs110());
        let (plug, _) = connect(&mock);

        let snapshot = plug.sys_info().unwrap();
        assert_eq!(snapshot.get("sw_ver"), Some(&json!("1.2.5 Build 171213 Rel.101523")));

        mock.set_info(json!({"relay_state": 0}));
        assert_eq!(snapshot.model(), Some("HS110(EU)"));
        assert_eq!(plug.sys_info().unwrap().model(), None);
    }
}
