use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use lancet_asn1::{date, int, oid};
use lancet_asn1_der::{from_der, from_der_with_options, DecodeOptions};
use lancet_asn1_schema::{Captures, Schema};
use num_bigint_dig::Sign;

fn certificate() -> Vec<u8> {
    BASE64
        .decode(
            "MIIEGjCCAgKgAwIBAgIEN8NXxDANBgkqhkiG9w0BAQsFADAiMSAwHgYDVQQ\
             DDBdjb250b3NvLmxvY2FsIEF1dGhvcml0eTAeFw0xOTEwMTcxNzQxMjhaFw0yMjEwM\
             TYxNzQxMjhaMB0xGzAZBgNVBAMMEnRlc3QuY29udG9zby5sb2NhbDCCASIwDQYJKoZ\
             IhvcNAQEBBQADggEPADCCAQoCggEBAMptALdk7xKj9JmFSycxlaTV47oLv5Aabir17\
             f1WseAcZ492Mx0wqcJMmT8rVAusyfqvrhodHu4GELGBySo4KChLEuoEOGTNw/wEMtM\
             6j1E9K7kig1iiuH9nf9oow7OUdix4+w7TWQWpwl1NekKdTtvLLtEGSjmG187CUqR6f\
             NHYag+iVMV5Umc5VQadvAgva8qxOsPpDkN/E2df5gST7H5g3igaZtxUa3x7VreN3qJ\
             P0+hYQiyM7KsgmdFAkKpHC6/k36H7SXtpzh0NbH5OJHifYsAP34WL+a6lAd0VM7UiI\
             RMcLWA8HfmKL3p4bC+LFv5I0dvUUy1BTz1wHpRvVz8CAwEAAaNdMFswCQYDVR0TBAI\
             wADAOBgNVHQ8BAf8EBAMCAaAwHQYDVR0OBBYEFCMimIgHf5c00sI9jZzeWoMLsR60M\
             B8GA1UdIwQYMBaAFBbHC24DEnsUFLz/zmqB5cMCHo9OMA0GCSqGSIb3DQEBCwUAA4I\
             CAQA1ehZTTBbes2DgGXwQugoV9PdOGMFEVT4dzrrluo/4exSfqLrNuY2NXVuNBKW4n\
             DA5aD71Q/KUZ8Y8cV9qa8OBJQvQ0dd0qeHmeEYdDsj5YD4ECycKx9U1ZX5fi6tpSIX\
             6DsietpCnrw4aTgbEOvMeQcuYCTP30Vpt+mYEKBlR/E2Vcl2zUD+67gqppSaC1RceL\
             /8Cy6ZXlPqwmS2zqK9UhYVRKlEww8xSh/9CR9MmIDc4pHtCpMawcn6Dmo+A+LcKi5v\
             /NIwvSJTei+h1gvRhvEOPcf4VZJMHXquNrxkMsKpuu7g/AYH7wl2MBaNaxyNlXY5e5\
             OjxslrbRCfDab11YaJEONcBnapl/+Ajr70uVFN09tDXyk0EHYf75NiRztgVKclna26\
             zP5qRb0JSYNQJW2kIIBX6DhU7kt6RcauF2hJ+jLWOF2vsAS8PdEr7vnR1EGOrrcQ3V\
             UgMscNsDqf50YMi2Inu1Kt2t+QSvYs61ON39aVpqR67nskdUWzFCVgWQVezM1ZagoO\
             yNp7WjRYl8hJ0YVZ7TRtP8nJOkZ6s046YHVWxMuGdqZfd/AUFb9xzzXjGRuuZ1JmSf\
             +VBOFEe2MaPMyMQBeIs3Othz6Fcy6Am5F6c3It31WYJwiCa/NdbMIvGy1xvAN5kzR/\
             Y6hkoQljoSr1rVuszJ9dtvuTccA==",
        )
        .expect("invalid base64")
}

fn algorithm_identifier(name: &str, capture: &str) -> Schema {
    Schema::sequence(name).value(vec![
        Schema::oid("algorithm").capture(capture),
        Schema::new("parameters").optional(),
    ])
}

fn certificate_schema() -> Schema {
    Schema::sequence("certificate").value(vec![
        Schema::sequence("tbsCertificate").value(vec![
            Schema::context("version", 0)
                .optional()
                .value(vec![Schema::integer("versionNumber").capture("version")]),
            Schema::integer("serialNumber").capture("serial"),
            algorithm_identifier("signature", "tbsSigAlgOid"),
            Schema::sequence("issuer").capture_asn1("issuer"),
            Schema::sequence("validity").value(vec![
                Schema::new("notBefore").capture("notBefore"),
                Schema::new("notAfter").capture("notAfter"),
            ]),
            Schema::sequence("subject").capture_asn1("subject"),
            Schema::sequence("subjectPublicKeyInfo").value(vec![
                algorithm_identifier("algorithm", "keyAlgOid"),
                Schema::bit_string("subjectPublicKey").composed().value(vec![
                    Schema::sequence("rsaPublicKey").value(vec![
                        Schema::integer("modulus").capture("modulus"),
                        Schema::integer("publicExponent").capture("exponent"),
                    ]),
                ]),
            ]),
            Schema::context("extensions", 3)
                .optional()
                .capture_asn1("extensions"),
        ]),
        algorithm_identifier("signatureAlgorithm", "sigAlgOid"),
        Schema::bit_string("signatureValue").capture_bit_string_value("signature"),
    ])
}

fn check_captures(captures: &Captures) {
    assert_eq!(captures.bytes("version"), Some(&[0x02][..]));
    assert_eq!(
        captures.bytes("serial"),
        Some(&[0x37, 0xC3, 0x57, 0xC4][..])
    );

    for name in ["tbsSigAlgOid", "sigAlgOid"] {
        let sig_alg = oid::der_to_oid(captures.bytes(name).unwrap()).unwrap();
        assert_eq!(sig_alg, "1.2.840.113549.1.1.11");
    }
    let key_alg = oid::der_to_oid(captures.bytes("keyAlgOid").unwrap()).unwrap();
    assert_eq!(key_alg, "1.2.840.113549.1.1.1");

    let not_before = std::str::from_utf8(captures.bytes("notBefore").unwrap()).unwrap();
    let date = date::utc_time_to_date(not_before).unwrap();
    assert_eq!(
        (date.year(), date.month(), date.day()),
        (2019, 10, 17)
    );

    let modulus = int::der_to_big_integer(captures.bytes("modulus").unwrap()).unwrap();
    assert_eq!(modulus.sign(), Sign::Plus);
    assert_eq!(modulus.bits(), 2048);
    let exponent = int::der_to_integer(captures.bytes("exponent").unwrap()).unwrap();
    assert_eq!(exponent, 65537);

    // 4096-bit RSA signature
    assert_eq!(captures.bytes("signature").map(<[u8]>::len), Some(512));

    assert!(captures.node("issuer").is_some());
    assert!(captures.node("extensions").is_some());
}

#[test]
fn captures_certificate_fields() {
    let cert = from_der(&certificate()).expect("decode certificate");
    let captures = certificate_schema()
        .validate(&cert)
        .expect("certificate matches schema");
    check_captures(&captures);
}

#[test]
fn composed_bridges_a_raw_decode() {
    // with the decoder heuristic off the subjectPublicKey stays primitive
    // and the validator has to expand it itself
    let options = DecodeOptions {
        decode_bit_strings: false,
        ..DecodeOptions::default()
    };
    let cert = from_der_with_options(&certificate(), &options).expect("decode certificate");
    let captures = certificate_schema()
        .validate(&cert)
        .expect("certificate matches schema");
    check_captures(&captures);
}

#[test]
fn serial_schema_rejects_wrong_shape() {
    let cert = from_der(&certificate()).expect("decode certificate");
    let schema = Schema::sequence("certificate").value(vec![
        Schema::sequence("tbsCertificate").value(vec![
            Schema::integer("serialNumber"),
        ]),
    ]);
    // first tbs element is the [0] version wrapper, not an INTEGER
    let error = schema.validate(&cert).unwrap_err();
    assert!(error
        .to_string()
        .contains("required element \"serialNumber\" did not match"));
}
