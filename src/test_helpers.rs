use std::{
    collections::HashMap,
    fs,
    io::{self, Cursor, Read, Write},
    path::PathBuf,
    sync::Mutex,
};

use crate::{
    fetcher::providers::{generic::StreamOpener, s3::ObjectStoreApi},
    utils::{
        command::{CommandError, CommandLine, CommandRunner},
        errors::ResultWithError,
    },
};

/// Command runner that records every call and replays a canned result.
/// With a body set, it writes the body to the path following `-o`.
pub(crate) struct FakeRunner {
    calls: Mutex<Vec<CommandLine>>,
    result: Result<Vec<String>, (i32, String)>,
    body: Option<Vec<u8>>,
}

impl FakeRunner {
    pub(crate) fn ok(lines: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            result: Ok(lines.iter().map(|l| (*l).to_owned()).collect()),
            body: None,
        }
    }

    pub(crate) fn failing(status: i32, output: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            result: Err((status, output.to_owned())),
            body: None,
        }
    }

    pub(crate) fn with_body(mut self, body: &[u8]) -> Self {
        self.body = Some(body.to_vec());
        self
    }

    pub(crate) fn calls(&self) -> Vec<CommandLine> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn only_call(&self) -> CommandLine {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one command, got {calls:?}");
        calls.into_iter().next().unwrap()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, command: &CommandLine) -> Result<Vec<String>, CommandError> {
        self.calls.lock().unwrap().push(command.clone());

        if let Some(body) = &self.body
            && let Some(dest) = value_after(command, "-o")
        {
            fs::write(dest, body).unwrap();
        }

        self.result
            .clone()
            .map_err(|(status, output)| CommandError::Failed {
                command: command.render(),
                status,
                output,
            })
    }
}

pub(crate) fn value_after<'a>(command: &'a CommandLine, flag: &str) -> Option<&'a str> {
    let args = command.get_args();
    args.iter()
        .position(|a| a == flag)
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
}

/// In-memory object store keyed by (bucket, key). Unknown buckets fail the location lookup.
pub(crate) struct FakeObjectStore {
    regions: HashMap<String, Option<String>>,
    objects: HashMap<(String, String), Vec<u8>>,
    requested: Mutex<Vec<String>>,
}

impl FakeObjectStore {
    pub(crate) fn new() -> Self {
        Self {
            regions: HashMap::new(),
            objects: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_bucket(mut self, bucket: &str, region: Option<&str>) -> Self {
        self.regions
            .insert(bucket.to_owned(), region.map(str::to_owned));
        self
    }

    pub(crate) fn with_object(mut self, bucket: &str, key: &str, body: &[u8]) -> Self {
        self.objects
            .insert((bucket.to_owned(), key.to_owned()), body.to_vec());
        self
    }

    /// Regions the object fetches were issued against, in order.
    pub(crate) fn requested_regions(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl ObjectStoreApi for FakeObjectStore {
    fn bucket_region(&self, bucket: &str) -> ResultWithError<String> {
        match self.regions.get(bucket) {
            Some(region) => Ok(region.clone().unwrap_or_else(|| "us-east-1".to_owned())),
            None => Err(format!("Failed to locate bucket {bucket}: AccessDenied").into()),
        }
    }

    fn get_object(
        &self,
        region: &str,
        bucket: &str,
        key: &str,
        writer: &mut dyn Write,
    ) -> ResultWithError<u64> {
        self.requested.lock().unwrap().push(region.to_owned());
        let body = self
            .objects
            .get(&(bucket.to_owned(), key.to_owned()))
            .ok_or_else(|| format!("Failed to get s3://{bucket}/{key}: NoSuchKey"))?;
        writer.write_all(body)?;
        Ok(body.len() as u64)
    }
}

/// Stream opener serving fixed bytes per URL.
pub(crate) struct FakeOpener {
    bodies: HashMap<String, Vec<u8>>,
}

impl FakeOpener {
    pub(crate) fn new() -> Self {
        Self {
            bodies: HashMap::new(),
        }
    }

    pub(crate) fn with(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_owned(), body.to_vec());
        self
    }
}

impl StreamOpener for FakeOpener {
    fn open(&self, url: &str) -> io::Result<Box<dyn Read>> {
        self.bodies
            .get(url)
            .map(|body| Box::new(Cursor::new(body.clone())) as Box<dyn Read>)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no body for {url}")))
    }
}

pub(crate) fn scratch_file(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, b"").unwrap();
    path
}
