use granary_models::{
    Error as ServerError, InstanceStatus, ObjectId, ObjectMeta, ObjectRecord, Payload, PutReply,
    RegisterReply,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::blocking as http;
use reqwest::StatusCode;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;
use thiserror::Error;

/// The closed set of failures a store session can produce, so callers can
/// branch on the kind instead of on message text.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to connect to the server at {endpoint}")]
    Connection {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("object {0} is not found")]
    NotFound(ObjectId),

    #[error("object {0} is still referred to by other objects")]
    ReferenceConflict(ObjectId),

    #[error("malformed reply from the server")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("server error: {0}")]
    Server(String),

    #[error(transparent)]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ClientError::Decode(Box::new(error))
        } else {
            ClientError::Transport(error)
        }
    }
}

/// A blocking RPC session with one granary instance. All admin operations
/// go through here; IPC is only ever used to discover the RPC endpoint.
pub struct Session {
    http: http::Client,
    base: String,
}

impl Session {
    pub fn connect(host: &str, port: u16) -> Result<Self, ClientError> {
        let endpoint = format!("{}:{}", host, port);
        let base = format!("http://{}", endpoint);

        // the registration handshake doubles as the connection check
        let http = http::Client::new();
        let response = http
            .get(&format!("{}/api/register", base))
            .send()
            .map_err(|source| ClientError::Connection {
                endpoint,
                source: Box::new(source),
            })?;
        check(response, None)?.json::<RegisterReply>()?;

        Ok(Session { http, base })
    }

    pub fn list_objects(
        &self,
        pattern: &str,
        regex: bool,
        limit: usize,
    ) -> Result<Vec<ObjectMeta>, ClientError> {
        let response = self
            .http
            .get(&format!("{}/api/objects", self.base))
            .query(&[("pattern", pattern)])
            .query(&[("regex", regex.to_string()), ("limit", limit.to_string())])
            .send()?;

        Ok(check(response, None)?.json()?)
    }

    pub fn get_object(&self, id: &ObjectId) -> Result<ObjectRecord, ClientError> {
        let response = self.http.get(&self.object_url(id)).send()?;

        Ok(check(response, Some(id))?.json()?)
    }

    pub fn delete(&self, id: &ObjectId, force: bool, deep: bool) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(&self.object_url(id))
            .query(&[("force", force.to_string()), ("deep", deep.to_string())])
            .send()?;

        check(response, Some(id))?;
        Ok(())
    }

    fn object_url(&self, id: &ObjectId) -> String {
        format!(
            "{}/api/objects/{}",
            self.base,
            encode_segment(&id.to_string())
        )
    }

    pub fn put(&self, payload: &Payload) -> Result<ObjectId, ClientError> {
        let response = self
            .http
            .post(&format!("{}/api/objects", self.base))
            .json(payload)
            .send()?;

        let reply: PutReply = check(response, None)?.json()?;
        Ok(reply.id)
    }

    pub fn status(&self) -> Result<InstanceStatus, ClientError> {
        let response = self.http.get(&format!("{}/api/status", self.base)).send()?;

        Ok(check(response, None)?.json()?)
    }
}

// Everything a URL path segment cannot carry verbatim. Opaque object
// references are user input, so they must not be able to reroute the
// request or break URL parsing.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

fn check(response: http::Response, subject: Option<&ObjectId>) -> Result<http::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match (status, subject) {
        (StatusCode::NOT_FOUND, Some(id)) => Err(ClientError::NotFound(id.clone())),
        (StatusCode::CONFLICT, Some(id)) => Err(ClientError::ReferenceConflict(id.clone())),
        _ => {
            let message = response
                .json::<ServerError>()
                .map(|error| error.error_msg)
                .unwrap_or_else(|_| status.to_string());
            Err(ClientError::Server(message))
        }
    }
}

/// A short-lived session on the server's IPC socket. The only exchange the
/// admin tool performs over IPC is the registration handshake, which
/// reports the RPC endpoint to reconnect to.
pub struct IpcSession {
    rpc_endpoint: String,
}

impl IpcSession {
    pub fn connect(path: &Path) -> Result<Self, ClientError> {
        let connection_error = |source: std::io::Error| ClientError::Connection {
            endpoint: path.display().to_string(),
            source: Box::new(source),
        };

        let mut stream = UnixStream::connect(path).map_err(&connection_error)?;

        let request = serde_json::json!({ "type": "register" });
        stream
            .write_all(request.to_string().as_bytes())
            .and_then(|()| stream.write_all(b"\n"))
            .map_err(&connection_error)?;

        let mut reply_line = String::new();
        BufReader::new(&stream)
            .read_line(&mut reply_line)
            .map_err(&connection_error)?;

        let reply: RegisterReply = serde_json::from_str(&reply_line)
            .map_err(|source| ClientError::Decode(Box::new(source)))?;

        Ok(IpcSession {
            rpc_endpoint: reply.rpc_endpoint,
        })
    }

    pub fn rpc_endpoint(&self) -> &str {
        &self.rpc_endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinary_ids_pass_through_unencoded() {
        assert_eq!(encode_segment("12345"), "12345");
        assert_eq!(encode_segment("o0001234"), "o0001234");
    }

    #[test]
    fn reserved_characters_cannot_reroute_the_request() {
        assert_eq!(encode_segment("a/b"), "a%2Fb");
        assert_eq!(encode_segment("a?force=true"), "a%3Fforce=true");
        assert_eq!(encode_segment("a b"), "a%20b");
        assert_eq!(encode_segment("50%"), "50%25");
    }
}
