use serde_json::{json, Value};
use std::sync::Arc;
use uplink_converter::{ConvertError, TruncationPolicy, UplinkConverter};
use uplink_payload::{ChannelDecoder, PayloadError};

fn uplink(data: &str) -> Value {
    json!({
        "deviceInfo": {
            "deviceName": "A1",
            "deviceProfileName": "P1",
            "devEui": "1000000000000001"
        },
        "time": "2023-05-22T07:47:05.404859+00:00",
        "data": data
    })
}

fn values(output: &Value) -> &Value {
    &output["telemetry"]["values"]
}

#[test]
fn test_full_conversion_gateway_sample() {
    let converter = UplinkConverter::default();

    let output = converter.convert_value(&uplink("AUVdAiIOTARoIA==")).unwrap();

    assert_eq!(
        output,
        json!({
            "deviceName": "A1",
            "deviceType": "P1",
            "attributes": {"devEui": "1000000000000001"},
            "telemetry": {
                "ts": 1684741625404i64,
                "values": {"battery": 93, "temperature": 36.6, "humidity": 32}
            }
        })
    );
}

#[test]
fn test_identity_fields_copied_verbatim() {
    let converter = UplinkConverter::default();
    let input = json!({
        "deviceInfo": {
            "deviceName": "Greenhouse West #3",
            "deviceProfileName": "EM300-TH",
            "devEui": "not-really-hex"
        },
        "time": "2024-02-29T23:59:59Z",
        "data": ""
    });

    let output = converter.convert_value(&input).unwrap();

    assert_eq!(output["deviceName"], input["deviceInfo"]["deviceName"]);
    assert_eq!(output["deviceType"], input["deviceInfo"]["deviceProfileName"]);
    assert_eq!(output["attributes"]["devEui"], input["deviceInfo"]["devEui"]);
    assert_eq!(output["telemetry"]["ts"], json!(1709251199000i64));
}

#[test]
fn test_empty_payload_has_empty_values() {
    let converter = UplinkConverter::default();
    let output = converter.convert_value(&uplink("")).unwrap();
    assert_eq!(values(&output), &json!({}));
}

#[test]
fn test_single_readings() {
    let converter = UplinkConverter::default();

    let output = converter.convert_value(&uplink("AUVk")).unwrap();
    assert_eq!(values(&output), &json!({"battery": 100}));

    let output = converter.convert_value(&uplink("AiIAjA==")).unwrap();
    assert_eq!(values(&output), &json!({"temperature": 1.4}));

    let output = converter.convert_value(&uplink("BGg3")).unwrap();
    assert_eq!(values(&output), &json!({"humidity": 55}));
}

#[test]
fn test_duplicate_record_last_write_wins() {
    let converter = UplinkConverter::default();
    // 01 45 10 01 45 20
    let output = converter.convert_value(&uplink("AUUQAUUg")).unwrap();
    assert_eq!(values(&output), &json!({"battery": 32}));
}

#[test]
fn test_unknown_pair_skipped() {
    let converter = UplinkConverter::default();
    // FF FF 04 68 37
    let output = converter.convert_value(&uplink("//8EaDc=")).unwrap();
    assert_eq!(values(&output), &json!({"humidity": 55}));
}

#[test]
fn test_truncated_payload_rejected_by_default() {
    let converter = UplinkConverter::default();
    // 02 22
    let result = converter.convert_value(&uplink("AiI="));
    assert!(matches!(
        result,
        Err(ConvertError::TruncatedPayload(PayloadError::TruncatedPayload {
            channel_id: 0x02,
            channel_type: 0x22,
            ..
        }))
    ));
}

#[test]
fn test_truncated_payload_kept_when_configured() {
    let converter = UplinkConverter::new(
        Arc::new(ChannelDecoder::new()),
        TruncationPolicy::KeepDecoded,
    );
    // 04 68 20 02 22
    let output = converter.convert_value(&uplink("BGggAiI=")).unwrap();
    assert_eq!(values(&output), &json!({"humidity": 32}));
}

#[test]
fn test_unpadded_base64_sample() {
    let converter = UplinkConverter::default();
    let output = converter.convert_value(&uplink("AUVdAiIOTARoIA")).unwrap();
    assert_eq!(
        values(&output),
        &json!({"battery": 93, "temperature": 36.6, "humidity": 32})
    );
}

#[test]
fn test_invalid_base64() {
    let converter = UplinkConverter::default();
    let result = converter.convert_value(&uplink("AUVd!iIOTARoIA=="));
    assert!(matches!(result, Err(ConvertError::InvalidEncoding(_))));
}

#[test]
fn test_timestamp_without_offset() {
    let converter = UplinkConverter::default();
    let mut input = uplink("AUVk");
    input["time"] = json!("2023-05-22T07:47:05.404859");
    let result = converter.convert_value(&input);
    assert!(matches!(result, Err(ConvertError::TimestampFormat { .. })));
}

#[test]
fn test_conversion_is_idempotent() {
    let converter = UplinkConverter::default();
    let input = uplink("AUVdAiIOTARoIA==");

    let first = serde_json::to_string(&converter.convert_value(&input).unwrap()).unwrap();
    let second = serde_json::to_string(&converter.convert_value(&input).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_concurrent_conversions_share_one_converter() {
    let converter = Arc::new(UplinkConverter::default());
    let expected = converter
        .convert_value(&uplink("AUVdAiIOTARoIA=="))
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let converter = Arc::clone(&converter);
            std::thread::spawn(move || converter.convert_value(&uplink("AUVdAiIOTARoIA==")))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), expected);
    }
}
