use std::env;
use std::process;

use megacp::base64::base64url_decode;
use megacp::{ApiClient, MegaError, Session};

pub fn usage_and_exit(usage: &str) -> ! {
    eprintln!("{usage}");
    process::exit(2);
}

pub struct ArgParser {
    args: Vec<String>,
    usage: &'static str,
}

impl ArgParser {
    pub fn new(usage: &'static str) -> Self {
        let args: Vec<String> = env::args().skip(1).collect();

        if args.iter().any(|a| a == "--help" || a == "-h") {
            println!("{usage}");
            process::exit(0);
        }

        Self { args, usage }
    }

    pub fn take_value(&mut self, names: &[&str]) -> Option<String> {
        let mut i = 0;
        while i < self.args.len() {
            if names.contains(&self.args[i].as_str()) {
                let value = self.args.get(i + 1).cloned();
                if value.is_none() {
                    usage_and_exit(self.usage);
                }
                self.args.drain(i..=i + 1);
                return value;
            }
            i += 1;
        }
        None
    }

    /// Remove every occurrence of a boolean flag, returning whether it was seen.
    pub fn take_flag(&mut self, names: &[&str]) -> bool {
        let before = self.args.len();
        self.args.retain(|a| !names.contains(&a.as_str()));
        self.args.len() != before
    }

    pub fn remaining(self) -> Vec<String> {
        self.args
    }
}

/// An existing session, standing in for a login.
pub struct SessionArgs {
    pub session_id: String,
    pub master_key: String,
    pub user_handle: String,
    pub proxy: Option<String>,
}

pub fn session_from_parser(parser: &mut ArgParser, usage: &'static str) -> SessionArgs {
    let session_id = parser
        .take_value(&["--session", "-s"])
        .unwrap_or_else(|| usage_and_exit(usage));
    let master_key = parser
        .take_value(&["--master-key", "-k"])
        .unwrap_or_else(|| usage_and_exit(usage));
    let user_handle = parser
        .take_value(&["--user-handle", "-u"])
        .unwrap_or_else(|| usage_and_exit(usage));
    let proxy = parser.take_value(&["--proxy"]);

    SessionArgs {
        session_id,
        master_key,
        user_handle,
        proxy,
    }
}

impl SessionArgs {
    pub fn open(&self) -> megacp::Result<Session> {
        let key = base64url_decode(&self.master_key)?;
        let master_key: [u8; 16] = key
            .as_slice()
            .try_into()
            .map_err(|_| MegaError::InvalidArguments("Master key must be 16 bytes".to_string()))?;

        let mut api = match &self.proxy {
            Some(proxy) => ApiClient::with_proxy(proxy)?,
            None => ApiClient::new(),
        };
        api.set_session_id(self.session_id.clone());

        Ok(Session::new(api, self.user_handle.clone(), master_key))
    }
}
