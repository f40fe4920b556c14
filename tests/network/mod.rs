use libmqtt::network::error::Error;
use libmqtt::network::*;


pub const MOCK_BUFFER_SIZE: usize = 1024;

/// In-memory transport. Reads drain a scripted byte queue at most
/// `chunk_size` bytes at a time and return `Ok(0)` once it is empty; writes
/// are recorded.
#[derive(Debug)]
pub struct MockConnection {
    read_buffer: [u8; MOCK_BUFFER_SIZE],
    write_buffer: [u8; MOCK_BUFFER_SIZE],
    read_pos: usize,
    write_pos: usize,
    pub chunk_size: usize,
    pub reads: usize,
    pub is_open: bool,
}

impl MockConnection {
    pub fn new() -> Self {
        Self {
            read_buffer: [0; MOCK_BUFFER_SIZE],
            write_buffer: [0; MOCK_BUFFER_SIZE],
            read_pos: 0,
            write_pos: 0,
            chunk_size: usize::MAX,
            reads: 0,
            is_open: true,
        }
    }

    /// A connection whose reads will deliver `data`.
    pub fn with_read_data(data: &[u8]) -> Self {
        let mut conn = Self::new();
        conn.push_read_data(data);
        conn
    }

    /// Queue `data` behind whatever is still unread.
    pub fn push_read_data(&mut self, data: &[u8]) {
        let len = data.len().min(MOCK_BUFFER_SIZE - self.read_pos);
        self.read_buffer[self.read_pos..self.read_pos + len].copy_from_slice(&data[..len]);
        self.read_pos += len;
    }

    /// Everything written so far.
    pub fn written(&self) -> &[u8] {
        &self.write_buffer[..self.write_pos]
    }

    pub fn unread(&self) -> usize {
        self.read_pos
    }
}

impl Read for MockConnection {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if !self.is_open {
            return Err(Error::NotOpen);
        }
        self.reads += 1;
        let readable = self.read_pos;
        let len = buf.len().min(readable).min(self.chunk_size);
        buf[..len].copy_from_slice(&self.read_buffer[..len]);

        // Shift remaining data
        self.read_buffer.copy_within(len..readable, 0);
        self.read_pos -= len;

        Ok(len)
    }
}

impl Write for MockConnection {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if !self.is_open {
            return Err(Error::NotOpen);
        }
        let writeable = MOCK_BUFFER_SIZE - self.write_pos;
        let len = buf.len().min(writeable).min(self.chunk_size);
        self.write_buffer[self.write_pos..self.write_pos + len].copy_from_slice(&buf[..len]);
        self.write_pos += len;
        Ok(len)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if !self.is_open {
            return Err(Error::NotOpen);
        }
        Ok(())
    }
}

impl Close for MockConnection {
    type Error = Error;

    fn close(self) -> Result<(), Self::Error> {
        if !self.is_open {
            return Err(Error::NotOpen);
        }
        Ok(())
    }
}

impl Connection for MockConnection {}

struct MockNetwork;

impl Connect for MockNetwork {
    type Connection = MockConnection;
    type Error = Error;

    fn connect(&mut self, _remote: &str) -> Result<Self::Connection, Self::Error> {
        Ok(MockConnection::new())
    }
}

#[test]
fn test_connect_and_close() {
    let mut network = MockNetwork;
    let conn = network.connect("mock://broker").unwrap();
    assert!(conn.is_open);
    Close::close(conn).unwrap();
}

#[test]
fn test_read_write() {
    let mut conn = MockConnection::new();
    let write_data = [1, 2, 3, 4];

    let bytes_written = Write::write(&mut conn, &write_data).unwrap();
    assert_eq!(bytes_written, write_data.len());
    assert_eq!(conn.written(), &write_data);

    let read_data = [5, 6, 7, 8];
    conn.push_read_data(&read_data);
    let mut read_buf = [0; 4];
    let bytes_read = Read::read(&mut conn, &mut read_buf).unwrap();
    assert_eq!(bytes_read, read_data.len());
    assert_eq!(read_buf, read_data);
}

#[test]
fn test_read_empty_means_closed() {
    let mut conn = MockConnection::new();
    let mut read_buf = [0; 4];
    assert_eq!(Read::read(&mut conn, &mut read_buf), Ok(0));
}

#[test]
fn test_chunked_reads() {
    let mut conn = MockConnection::with_read_data(&[1, 2, 3, 4, 5]);
    conn.chunk_size = 2;
    let mut read_buf = [0; 8];
    assert_eq!(Read::read(&mut conn, &mut read_buf), Ok(2));
    assert_eq!(&read_buf[..2], &[1, 2]);
    assert_eq!(conn.unread(), 3);
    assert_eq!(Read::read(&mut conn, &mut read_buf), Ok(2));
    assert_eq!(&read_buf[..2], &[3, 4]);
    assert_eq!(Read::read(&mut conn, &mut read_buf), Ok(1));
    assert_eq!(conn.reads, 3);
}

#[test]
fn test_write_full() {
    let mut conn = MockConnection::new();
    let large_data = [0xAA; MOCK_BUFFER_SIZE + 1];
    let bytes_written = Write::write(&mut conn, &large_data).unwrap();
    assert_eq!(bytes_written, MOCK_BUFFER_SIZE);
}

#[test]
fn test_op_on_closed_connection() {
    let mut conn = MockConnection::new();
    conn.is_open = false;

    let mut buf = [0; 4];
    assert_eq!(Read::read(&mut conn, &mut buf), Err(Error::NotOpen));
    assert_eq!(Write::write(&mut conn, &[1, 2]), Err(Error::NotOpen));
    assert_eq!(Write::flush(&mut conn), Err(Error::NotOpen));
}

#[cfg(feature = "async")]
mod async_tests {
    use super::*;
    use futures::executor::block_on;

    impl AsyncRead for MockConnection {
        type Error = Error;
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            Read::read(self, buf)
        }
    }

    impl AsyncWrite for MockConnection {
        type Error = Error;
        async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            Write::write(self, buf)
        }
        async fn flush(&mut self) -> Result<(), Self::Error> {
            Write::flush(self)
        }
    }

    impl AsyncClose for MockConnection {
        type Error = Error;
        async fn close(self) -> Result<(), Self::Error> {
            Close::close(self)
        }
    }

    impl AsyncConnection for MockConnection {}

    struct AsyncMockNetwork;

    impl AsyncConnect for AsyncMockNetwork {
        type Connection = MockConnection;
        type Error = Error;

        async fn connect(&mut self, _remote: &str) -> Result<Self::Connection, Self::Error> {
            Ok(MockConnection::new())
        }
    }

    #[test]
    fn test_async_read_write() {
        block_on(async {
            let mut network = AsyncMockNetwork;
            let mut conn = network.connect("mock://broker").await.unwrap();

            let write_data = [10, 20, 30, 40];
            let bytes_written = AsyncWrite::write(&mut conn, &write_data).await.unwrap();
            assert_eq!(bytes_written, write_data.len());

            conn.push_read_data(&write_data);
            let mut read_buf = [0; 4];
            let bytes_read = AsyncRead::read(&mut conn, &mut read_buf).await.unwrap();
            assert_eq!(bytes_read, write_data.len());
            assert_eq!(read_buf, write_data);

            AsyncClose::close(conn).await.unwrap();
        });
    }
}
