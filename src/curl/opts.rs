//! curl's option vocabulary
//!
//! Every flag curlgen understands, in long and short form, mapped to one
//! canonical [`Flag`]. Flags that only change how curl itself behaves (output,
//! progress, TLS verification, timeouts, ...) are known but ignored: they
//! resolve to [`Flag::Ignored`] so the builder can report them as warnings.

/// Which `--data*` flag supplied a value; they differ in how the value is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// `-d`, `--data`, `--data-ascii`
    Ascii,
    /// `--data-raw`: `@` is not special
    Raw,
    /// `--data-binary`
    Binary,
    /// `--data-urlencode`
    UrlEncode,
    /// `--json`
    Json,
}

/// Canonical identity of a resolved option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// Positional argument or `--url`
    Url,
    Request,
    Header,
    Data(DataKind),
    Form,
    FormString,
    User,
    UserAgent,
    Referer,
    Cookie,
    UploadFile,
    Get,
    Head,
    /// Known flag with no effect on the generated request, by long name
    Ignored(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct FlagSpec {
    pub long: &'static str,
    pub short: Option<char>,
    pub flag: Flag,
    pub takes_value: bool,
}

const fn value(long: &'static str, short: Option<char>, flag: Flag) -> FlagSpec {
    FlagSpec {
        long,
        short,
        flag,
        takes_value: true,
    }
}

const fn switch(long: &'static str, short: Option<char>, flag: Flag) -> FlagSpec {
    FlagSpec {
        long,
        short,
        flag,
        takes_value: false,
    }
}

const fn ignored(long: &'static str, short: Option<char>, takes_value: bool) -> FlagSpec {
    FlagSpec {
        long,
        short,
        flag: Flag::Ignored(long),
        takes_value,
    }
}

pub const FLAGS: &[FlagSpec] = &[
    value("url", None, Flag::Url),
    value("request", Some('X'), Flag::Request),
    value("header", Some('H'), Flag::Header),
    value("data", Some('d'), Flag::Data(DataKind::Ascii)),
    value("data-ascii", None, Flag::Data(DataKind::Ascii)),
    value("data-raw", None, Flag::Data(DataKind::Raw)),
    value("data-binary", None, Flag::Data(DataKind::Binary)),
    value("data-urlencode", None, Flag::Data(DataKind::UrlEncode)),
    value("json", None, Flag::Data(DataKind::Json)),
    value("form", Some('F'), Flag::Form),
    value("form-string", None, Flag::FormString),
    value("user", Some('u'), Flag::User),
    value("user-agent", Some('A'), Flag::UserAgent),
    value("referer", Some('e'), Flag::Referer),
    value("cookie", Some('b'), Flag::Cookie),
    value("upload-file", Some('T'), Flag::UploadFile),
    switch("get", Some('G'), Flag::Get),
    switch("head", Some('I'), Flag::Head),
    // Switches that only change curl's own behaviour
    ignored("silent", Some('s'), false),
    ignored("show-error", Some('S'), false),
    ignored("verbose", Some('v'), false),
    ignored("include", Some('i'), false),
    ignored("location", Some('L'), false),
    ignored("location-trusted", None, false),
    ignored("insecure", Some('k'), false),
    ignored("compressed", None, false),
    ignored("fail", Some('f'), false),
    ignored("fail-with-body", None, false),
    ignored("globoff", Some('g'), false),
    ignored("no-buffer", Some('N'), false),
    ignored("progress-bar", Some('#'), false),
    ignored("remote-name", Some('O'), false),
    ignored("remote-header-name", Some('J'), false),
    ignored("http1.0", Some('0'), false),
    ignored("http1.1", None, false),
    ignored("http2", None, false),
    ignored("http2-prior-knowledge", None, false),
    ignored("http3", None, false),
    ignored("ipv4", Some('4'), false),
    ignored("ipv6", Some('6'), false),
    ignored("basic", None, false),
    ignored("digest", None, false),
    ignored("ntlm", None, false),
    ignored("anyauth", None, false),
    ignored("path-as-is", None, false),
    ignored("raw", None, false),
    ignored("tr-encoding", None, false),
    ignored("keepalive", None, false),
    ignored("disable", Some('q'), false),
    // Flags with a value that only change curl's own behaviour
    ignored("output", Some('o'), true),
    ignored("max-time", Some('m'), true),
    ignored("connect-timeout", None, true),
    ignored("max-redirs", None, true),
    ignored("retry", None, true),
    ignored("retry-delay", None, true),
    ignored("retry-max-time", None, true),
    ignored("proxy", Some('x'), true),
    ignored("proxy-user", Some('U'), true),
    ignored("cacert", None, true),
    ignored("capath", None, true),
    ignored("cert", Some('E'), true),
    ignored("key", None, true),
    ignored("cookie-jar", Some('c'), true),
    ignored("dump-header", Some('D'), true),
    ignored("write-out", Some('w'), true),
    ignored("trace", None, true),
    ignored("trace-ascii", None, true),
    ignored("stderr", None, true),
    ignored("limit-rate", None, true),
    ignored("resolve", None, true),
    ignored("connect-to", None, true),
    ignored("interface", None, true),
    ignored("keepalive-time", None, true),
    ignored("speed-limit", Some('Y'), true),
    ignored("speed-time", Some('y'), true),
];

/// Look up a long flag by its name without the leading `--`
pub fn lookup_long(name: &str) -> Option<&'static FlagSpec> {
    FLAGS.iter().find(|spec| spec.long == name)
}

/// Look up a short flag by its letter
pub fn lookup_short(c: char) -> Option<&'static FlagSpec> {
    FLAGS.iter().find(|spec| spec.short == Some(c))
}
