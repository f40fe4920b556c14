use crate::network::MockConnection;
use libmqtt::network::application::mqtt::{
    Client, ConnectReturnCode, Error, Options, Packet, PacketKind, QoS,
};

const CONNECT_DEV: [u8; 17] = [
    0x10, 0x0F, 0x00, 0x04, b'M', b'Q', b'T', b'T', 0x04, 0x02, 0x00, 0x3C, 0x00, 0x03, b'd',
    b'e', b'v',
];
const CONNACK_ACCEPTED: [u8; 4] = [0x20, 0x02, 0x00, 0x00];

fn connected(inbound: &[u8]) -> Client<MockConnection, 256> {
    let mut conn = MockConnection::with_read_data(&CONNACK_ACCEPTED);
    conn.push_read_data(inbound);
    Client::connect(conn, &Options::new("dev")).unwrap()
}

/// Bytes written after the CONNECT packet.
fn sent_after_connect<const N: usize>(client: &Client<MockConnection, N>) -> &[u8] {
    &client.connection().written()[CONNECT_DEV.len()..]
}

#[test]
fn test_connect_sends_connect_and_reads_connack() {
    let conn = MockConnection::with_read_data(&[0x20, 0x02, 0x01, 0x00]);
    let client: Client<_, 256> = Client::connect(conn, &Options::new("dev")).unwrap();
    assert!(client.session_present());
    assert_eq!(client.connection().written(), &CONNECT_DEV);
    assert_eq!(client.connection().unread(), 0);
}

#[test]
fn test_connect_with_credentials_from_json() {
    let options = Options::from_json(
        r#"{"client_id":"c","keep_alive_seconds":10,"username":"u","password":"p"}"#,
    )
    .unwrap();
    let conn = MockConnection::with_read_data(&CONNACK_ACCEPTED);
    let client: Client<_, 64> = Client::connect(conn, &options).unwrap();
    assert_eq!(
        client.connection().written(),
        &[
            0x10, 0x13, 0x00, 0x04, b'M', b'Q', b'T', b'T', 0x04, 0xC2, 0x00, 0x0A, 0x00, 0x01,
            b'c', 0x00, 0x01, b'u', 0x00, 0x01, b'p',
        ]
    );
}

#[test]
fn test_connect_refused() {
    let conn = MockConnection::with_read_data(&[0x20, 0x02, 0x00, 0x05]);
    let result: Result<Client<_, 64>, _> = Client::connect(conn, &Options::new("dev"));
    let err = result.unwrap_err();
    assert_eq!(err, Error::ConnectionRefused(ConnectReturnCode::NotAuthorized));
    assert_eq!(err.to_string(), "Connection Refused: not authorized");
}

#[test]
fn test_connect_unexpected_reply() {
    let conn = MockConnection::with_read_data(&[0xD0, 0x00]);
    let result: Result<Client<_, 64>, _> = Client::connect(conn, &Options::new("dev"));
    assert_eq!(
        result.unwrap_err(),
        Error::UnexpectedPacket(PacketKind::Pingresp)
    );
}

#[test]
fn test_connect_stream_closed() {
    let result: Result<Client<_, 64>, _> =
        Client::connect(MockConnection::new(), &Options::new("dev"));
    assert_eq!(result.unwrap_err(), Error::ConnectionClosed);
}

#[test]
fn test_connect_transport_failure() {
    let mut conn = MockConnection::new();
    conn.is_open = false;
    let result: Result<Client<_, 64>, _> = Client::connect(conn, &Options::new("dev"));
    assert_eq!(result.unwrap_err(), Error::WriteError);
}

#[test]
fn test_subscribe_granted() {
    let mut client = connected(&[0x90, 0x03, 0x00, 0x01, 0x01]);
    assert_eq!(client.subscribe("a/+", QoS::AtLeastOnce), Ok(QoS::AtLeastOnce));
    assert_eq!(
        sent_after_connect(&client),
        &[0x82, 0x08, 0x00, 0x01, 0x00, 0x03, b'a', b'/', b'+', 0x01]
    );
}

#[test]
fn test_subscribe_downgraded() {
    let mut client = connected(&[0x90, 0x03, 0x00, 0x01, 0x00]);
    assert_eq!(client.subscribe("a/#", QoS::ExactlyOnce), Ok(QoS::AtMostOnce));
}

#[test]
fn test_subscribe_rejected() {
    let mut client = connected(&[0x90, 0x03, 0x00, 0x01, 0x80]);
    assert_eq!(
        client.subscribe("a/b", QoS::AtMostOnce),
        Err(Error::SubscriptionRejected)
    );
}

#[test]
fn test_subscribe_wrong_packet_id() {
    let mut client = connected(&[0x90, 0x03, 0x00, 0x02, 0x00]);
    assert_eq!(
        client.subscribe("a/b", QoS::AtMostOnce),
        Err(Error::UnexpectedPacketId {
            expected: 1,
            actual: 2,
        })
    );
}

#[test]
fn test_subscribe_invalid_filter_sends_nothing() {
    let mut client = connected(&[]);
    assert_eq!(
        client.subscribe("sport/tennis#", QoS::AtMostOnce),
        Err(Error::InvalidFilterSyntax)
    );
    assert!(sent_after_connect(&client).is_empty());
}

#[test]
fn test_subscribe_interrupted_by_publish() {
    let mut client = connected(&[0x30, 0x03, 0x00, 0x01, b't']);
    assert_eq!(
        client.subscribe("t", QoS::AtMostOnce),
        Err(Error::UnexpectedPacket(PacketKind::Publish))
    );
}

#[test]
fn test_publish_layouts_and_ids() {
    let mut client = connected(&[]);
    assert_eq!(client.publish("t", b"hi", QoS::AtMostOnce), Ok(None));
    assert_eq!(client.publish("t", b"hi", QoS::AtLeastOnce), Ok(Some(1)));
    assert_eq!(client.publish("t", b"", QoS::AtLeastOnce), Ok(Some(2)));
    assert_eq!(
        sent_after_connect(&client),
        &[
            0x30, 0x05, 0x00, 0x01, b't', b'h', b'i', //
            0x32, 0x07, 0x00, 0x01, b't', 0x00, 0x01, b'h', b'i', //
            0x32, 0x05, 0x00, 0x01, b't', 0x00, 0x02,
        ]
    );
}

#[test]
fn test_packet_ids_continue_across_requests() {
    let mut client = connected(&[0x90, 0x03, 0x00, 0x02, 0x02]);
    assert_eq!(client.publish("t", b"x", QoS::AtLeastOnce), Ok(Some(1)));
    assert_eq!(client.subscribe("t", QoS::ExactlyOnce), Ok(QoS::ExactlyOnce));
}

#[test]
fn test_publish_rejects_wildcard_topic() {
    let mut client = connected(&[]);
    assert_eq!(
        client.publish("a/+", b"x", QoS::AtMostOnce),
        Err(Error::InvalidTopicName)
    );
    assert!(sent_after_connect(&client).is_empty());
}

#[test]
fn test_poll_and_acknowledge() {
    let mut client = connected(&[0x32, 0x07, 0x00, 0x01, b't', 0x00, 0x09, b'h', b'i']);
    let packet_id = match client.poll().unwrap() {
        Packet::Publish(publish) => {
            assert_eq!(publish.topic, "t");
            assert_eq!(publish.payload, b"hi");
            assert_eq!(publish.qos, QoS::AtLeastOnce);
            publish.packet_id.unwrap()
        }
        other => panic!("unexpected {:?}", other),
    };
    client.acknowledge(packet_id).unwrap();
    assert_eq!(sent_after_connect(&client), &[0x40, 0x02, 0x00, 0x09]);
}

#[test]
fn test_poll_yields_acknowledgments() {
    let mut client = connected(&[0x40, 0x02, 0x00, 0x01]);
    assert_eq!(client.publish("t", b"x", QoS::AtLeastOnce), Ok(Some(1)));
    match client.poll().unwrap() {
        Packet::Puback(puback) => assert_eq!(puback.packet_id, 1),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(client.poll().unwrap_err(), Error::ConnectionClosed);
}

#[test]
fn test_poll_surfaces_decode_errors() {
    let mut client = connected(&[0x41, 0x02, 0x00, 0x01]);
    assert_eq!(
        client.poll().unwrap_err(),
        Error::MalformedFlags {
            kind: PacketKind::Puback,
            flags: 1,
        }
    );
}

#[test]
fn test_ping() {
    let mut client = connected(&[0xD0, 0x00]);
    client.ping().unwrap();
    assert_eq!(sent_after_connect(&client), &[0xC0, 0x00]);
}

#[test]
fn test_ping_unexpected_reply() {
    let mut client = connected(&[0x40, 0x02, 0x00, 0x01]);
    assert_eq!(
        client.ping(),
        Err(Error::UnexpectedPacket(PacketKind::Puback))
    );
}

#[test]
fn test_disconnect() {
    let client = connected(&[]);
    assert_eq!(client.disconnect(), Ok(()));
}

#[test]
fn test_byte_at_a_time_transport() {
    let mut conn = MockConnection::with_read_data(&CONNACK_ACCEPTED);
    conn.push_read_data(&[0x90, 0x03, 0x00, 0x01, 0x02]);
    conn.push_read_data(&[0x30, 0x04, 0x00, 0x01, b't', b'!']);
    conn.chunk_size = 1;

    let mut client: Client<_, 64> = Client::connect(conn, &Options::new("dev")).unwrap();
    assert_eq!(client.subscribe("t", QoS::ExactlyOnce), Ok(QoS::ExactlyOnce));
    match client.poll().unwrap() {
        Packet::Publish(publish) => assert_eq!(publish.payload, b"!"),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(&client.connection().written()[..CONNECT_DEV.len()], &CONNECT_DEV);
}

#[test]
fn test_small_buffers() {
    let mut conn = MockConnection::with_read_data(&CONNACK_ACCEPTED);
    conn.push_read_data(&[0x30, 0x14]);
    let mut client: Client<_, 16> = Client::connect(conn, &Options::new("d")).unwrap();

    assert_eq!(
        client.publish("t", &[0u8; 20], QoS::AtMostOnce),
        Err(Error::BufferTooSmall {
            needed: 25,
            available: 16,
        })
    );
    assert_eq!(
        client.poll().unwrap_err(),
        Error::PacketTooLarge {
            max: 16,
            actual: 22,
        }
    );
}
