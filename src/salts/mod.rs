pub mod random;
pub mod remote;

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use secrecy::SecretString;
use tracing::{debug, warn};

use crate::error::DotenvError;

pub type Result<T> = std::result::Result<T, DotenvError>;

lazy_static! {
    /// A single-quoted PHP string literal.
    static ref QUOTED: Regex = Regex::new(r"'([^']+)'").expect("salt literal pattern is valid");
}

/// The WordPress secret keys and salts, in the order WordPress defines them.
pub const SALT_KEYS: [&str; 8] = [
    "AUTH_KEY",
    "SECURE_AUTH_KEY",
    "LOGGED_IN_KEY",
    "NONCE_KEY",
    "AUTH_SALT",
    "SECURE_AUTH_SALT",
    "LOGGED_IN_SALT",
    "NONCE_SALT",
];

/// Produces one fresh salt value per call.
pub trait SaltProvider {
    fn salt(&self) -> Result<String>;
}

/// Returns a salt generator response body: one PHP `define('KEY', 'value');`
/// statement per line.
pub trait SaltSource {
    fn fetch(&self) -> Result<String>;
}

pub struct Salt {
    pub key: String,
    pub value: SecretString,
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Salt")
            .field("key", &self.key)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// An ordered set of named salts, consumed straight into an env file.
#[derive(Debug, Default)]
pub struct SaltSet {
    salts: Vec<Salt>,
}

impl SaltSet {
    /// One freshly generated value for each of the `SALT_KEYS`.
    pub fn generate_locally(provider: &dyn SaltProvider) -> Result<Self> {
        let salts = SALT_KEYS
            .iter()
            .map(|key| {
                Ok(Salt {
                    key: key.to_string(),
                    value: SecretString::new(provider.salt()?),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { salts })
    }

    pub fn fetch_remote(source: &dyn SaltSource) -> Result<Self> {
        let body = source.fetch()?;
        Self::parse_remote(&body)
    }

    /// Extract `(key, value)` pairs from `define('KEY', 'value');` lines.
    ///
    /// Every single-quoted literal on a line is captured in order and
    /// consecutive captures are paired. Values are not expected to contain
    /// single quotes.
    pub fn parse_remote(body: &str) -> Result<Self> {
        let mut salts = Vec::new();
        for line in body.lines().filter(|line| !line.trim().is_empty()) {
            let captures: Vec<&str> = QUOTED
                .captures_iter(line)
                .filter_map(|c| c.get(1))
                .map(|m| m.as_str())
                .collect();
            for pair in captures.chunks_exact(2) {
                salts.push(Salt {
                    key: pair[0].to_string(),
                    value: SecretString::new(pair[1].to_string()),
                });
            }
        }

        if salts.is_empty() {
            return Err(DotenvError::EmptyResponse);
        }
        if salts.len() != SALT_KEYS.len() {
            warn!(
                count = salts.len(),
                expected = SALT_KEYS.len(),
                "salt generator returned an unexpected number of salts"
            );
        }
        Ok(Self { salts })
    }

    pub fn len(&self) -> usize {
        self.salts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Salt> {
        self.salts.iter()
    }
}

/// Generate salts locally, falling back to the remote source when local
/// generation fails.
pub fn collect(provider: &dyn SaltProvider, source: &dyn SaltSource) -> Result<SaltSet> {
    let local_err = match SaltSet::generate_locally(provider) {
        Ok(salts) => {
            debug!(count = salts.len(), "generated salts locally");
            return Ok(salts);
        }
        Err(e) => e,
    };

    warn!(error = %local_err, "local salt generation failed, fetching from remote generator");

    match SaltSet::fetch_remote(source) {
        Ok(salts) => {
            debug!(count = salts.len(), "fetched salts from remote generator");
            Ok(salts)
        }
        Err(remote_err) => Err(DotenvError::SaltsUnavailable(format!(
            "{}; {}",
            local_err, remote_err
        ))),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    pub const FIXTURE: &str = "\
define('AUTH_KEY',         'n~2|Hq.3Rv1o(h8/3,Y5Lfl@h=sjy1G:-Kh+Xp*t^r');
define('SECURE_AUTH_KEY',  'b/F8{M;fAJH@rg-PyRS5]c!b2_yP3C|d>rIE<uCzs9');
define('LOGGED_IN_KEY',    'E%q#[3Lm4I[>^N}8Ga!Lpe>[&(r$!4x?8B`uMQ1Y$G');
define('NONCE_KEY',        '5jzH-jP@{3(Smw+y,p2oA$x2Fw?ZL5>KQ2~Gq8V)Z1');

define('AUTH_SALT',        'gM8cC^Lx9E-rZ+[!zF:q,6fV}o7Oh2#&K7b%sW<Tn2');
define('SECURE_AUTH_SALT', '0Fh2:R>`a=u=uB;mX+Dd;W~G)*1pgT]wJkY-v(A5sA');
define('LOGGED_IN_SALT',   'c!V1I-#tt{Ep3g>kW1.M9]m?3lo5D6hY@,z7TnOc}E');
define('NONCE_SALT',       'R+Zj/SP0 zQk7]q}Xa$S5@M2yC[e-j&4ovBf^:5F#g');
";

    pub struct FixedProvider(pub &'static str);

    impl SaltProvider for FixedProvider {
        fn salt(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    pub struct BrokenProvider;

    impl SaltProvider for BrokenProvider {
        fn salt(&self) -> Result<String> {
            Err(DotenvError::RandomSourceUnavailable("no entropy in tests".into()))
        }
    }

    pub struct FixtureSource(pub &'static str);

    impl SaltSource for FixtureSource {
        fn fetch(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct OfflineSource;

    impl SaltSource for OfflineSource {
        fn fetch(&self) -> Result<String> {
            Err(DotenvError::SaltFetch {
                url: "https://example.invalid/".into(),
                message: "offline".into(),
            })
        }
    }

    fn pairs(salts: &SaltSet) -> Vec<(String, String)> {
        salts
            .iter()
            .map(|s| (s.key.clone(), s.value.expose_secret().clone()))
            .collect()
    }

    #[test]
    fn test_generate_locally_uses_fixed_keys_in_order() {
        let salts = SaltSet::generate_locally(&FixedProvider("arandomstring")).unwrap();
        let expected: Vec<(String, String)> = SALT_KEYS
            .iter()
            .map(|k| (k.to_string(), "arandomstring".to_string()))
            .collect();
        assert_eq!(pairs(&salts), expected);
    }

    #[test]
    fn test_parse_remote_fixture() {
        let salts = SaltSet::parse_remote(FIXTURE).unwrap();
        assert_eq!(salts.len(), 8);

        let keys: Vec<String> = salts.iter().map(|s| s.key.clone()).collect();
        assert_eq!(keys, SALT_KEYS.map(String::from).to_vec());

        let all = pairs(&salts);
        assert_eq!(all[0].1, "n~2|Hq.3Rv1o(h8/3,Y5Lfl@h=sjy1G:-Kh+Xp*t^r");
        assert_eq!(all[7].1, "R+Zj/SP0 zQk7]q}Xa$S5@M2yC[e-j&4ovBf^:5F#g");
    }

    #[test]
    fn test_parse_remote_empty_response() {
        assert!(matches!(SaltSet::parse_remote(""), Err(DotenvError::EmptyResponse)));
        assert!(matches!(
            SaltSet::parse_remote("<html>Service unavailable</html>\n"),
            Err(DotenvError::EmptyResponse)
        ));
    }

    #[test]
    fn test_quoted_literal_pattern() {
        let found: Vec<&str> = QUOTED
            .captures_iter("define('AUTH_KEY', 'a b;c');")
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["AUTH_KEY", "a b;c"]);

        let again = SaltSet::parse_remote("define('A', 'x');").unwrap();
        assert_eq!(again.len(), 1);
    }

    #[test]
    fn test_collect_prefers_local_generation() {
        let salts = collect(&FixedProvider("arandomstring"), &FixtureSource(FIXTURE)).unwrap();
        assert!(pairs(&salts).iter().all(|(_, v)| v == "arandomstring"));
    }

    #[test]
    fn test_collect_falls_back_to_remote() {
        let salts = collect(&BrokenProvider, &FixtureSource(FIXTURE)).unwrap();
        assert_eq!(salts.len(), 8);
        assert_eq!(pairs(&salts)[1].0, "SECURE_AUTH_KEY");
        assert_eq!(pairs(&salts)[1].1, "b/F8{M;fAJH@rg-PyRS5]c!b2_yP3C|d>rIE<uCzs9");
    }

    #[test]
    fn test_collect_fails_when_both_paths_fail() {
        let err = collect(&BrokenProvider, &OfflineSource).unwrap_err();
        assert!(matches!(err, DotenvError::SaltsUnavailable(_)));
        assert!(err.to_string().contains("offline"));
    }

    #[test]
    fn test_collect_fails_on_empty_remote_response() {
        let err = collect(&BrokenProvider, &FixtureSource("")).unwrap_err();
        assert!(matches!(err, DotenvError::SaltsUnavailable(_)));
    }
}
