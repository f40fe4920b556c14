//! Smoke tests against a real broker. Run with `cargo test -- --ignored`,
//! optionally pointing `TEST_MQTT_ADDRESS` (or a `.env` file) at a broker.

use dotenvy::dotenv;
use libmqtt::network::application::mqtt::{Client, Options, Packet, QoS};
use libmqtt::network::error::Error;
use libmqtt::network::{Close, Connection, Read, Write};
use std::env;
use std::io::{Read as StdRead, Write as StdWrite};
use std::net::TcpStream;
use std::time::Duration;

struct NetConnection {
    stream: TcpStream,
}

impl Read for NetConnection {
    type Error = Error;
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.stream.read(buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::WouldBlock {
                Error::Timeout
            } else {
                Error::ReadError
            }
        })
    }
}

impl Write for NetConnection {
    type Error = Error;
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.stream.write(buf).map_err(|_| Error::WriteError)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.stream.flush().map_err(|_| Error::WriteError)
    }
}

impl Close for NetConnection {
    type Error = Error;
    fn close(self) -> Result<(), Self::Error> {
        self.stream
            .shutdown(std::net::Shutdown::Both)
            .map_err(|_| Error::NotOpen)
    }
}

impl Connection for NetConnection {}

fn open() -> NetConnection {
    dotenv().ok();
    let address = env::var("TEST_MQTT_ADDRESS").unwrap_or("test.mosquitto.org:1883".to_string());
    let stream = TcpStream::connect(address).expect("Failed to connect to broker");
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    NetConnection { stream }
}

#[test]
#[ignore = "needs a reachable MQTT broker"]
fn test_connect_to_public_broker() {
    let options = Options {
        keep_alive_seconds: 10,
        ..Options::new("libmqtt-test-client-12345")
    };
    let client: Client<_> = Client::connect(open(), &options).expect("Failed to connect");
    client.disconnect().expect("Failed to disconnect");
}

#[test]
#[ignore = "needs a reachable MQTT broker"]
fn test_publish_and_subscribe() {
    let options = Options {
        keep_alive_seconds: 10,
        ..Options::new("libmqtt-test-client-67890")
    };
    let mut client: Client<_> = Client::connect(open(), &options).expect("Failed to connect");

    let topic = "libmqtt/test-topic";
    let payload = b"hello world";

    client
        .subscribe(topic, QoS::AtLeastOnce)
        .expect("Failed to subscribe");
    client.ping().expect("Failed to ping");
    client
        .publish(topic, payload, QoS::AtMostOnce)
        .expect("Failed to publish");

    match client.poll().expect("Failed to poll") {
        Packet::Publish(publish) => {
            assert_eq!(publish.topic, topic);
            assert_eq!(publish.payload, payload);
        }
        other => panic!("unexpected {:?}", other),
    }
    client.disconnect().expect("Failed to disconnect");
}
