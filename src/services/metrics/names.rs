/// Metrics the request middleware records out of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinMetric {
    RequestTotal,
    RequestUvTotal,
    UriRequestTotal,
    RequestBody,
    ResponseBody,
    RequestDuration,
    SlowRequest,
}

impl BuiltinMetric {
    pub const ALL: [BuiltinMetric; 7] = [
        Self::RequestTotal,
        Self::RequestUvTotal,
        Self::UriRequestTotal,
        Self::RequestBody,
        Self::ResponseBody,
        Self::RequestDuration,
        Self::SlowRequest,
    ];

    /// Name before any prefix or suffix is applied
    pub fn base_name(&self) -> &'static str {
        match self {
            Self::RequestTotal => "http_request_total",
            Self::RequestUvTotal => "http_request_uv_total",
            Self::UriRequestTotal => "http_uri_request_total",
            Self::RequestBody => "http_request_body_total",
            Self::ResponseBody => "http_response_body_total",
            Self::RequestDuration => "http_request_duration",
            Self::SlowRequest => "http_slow_request_total",
        }
    }
}

/// Prefix and suffix applied to built-in metric names at lookup time.
///
/// Repeated prefixes stack outward and repeated suffixes stack in call
/// order: prefixing `x` with "a" then "b" resolves to "bax".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricNaming {
    prefix: String,
    suffix: String,
}

impl MetricNaming {
    pub fn push_prefix(&mut self, prefix: &str) {
        self.prefix.insert_str(0, prefix);
    }

    pub fn push_suffix(&mut self, suffix: &str) {
        self.suffix.push_str(suffix);
    }

    pub fn resolve(&self, base: &str) -> String {
        format!("{}{}{}", self.prefix, base, self.suffix)
    }

    pub fn name_of(&self, metric: BuiltinMetric) -> String {
        self.resolve(metric.base_name())
    }
}
