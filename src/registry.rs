// Copyright (C) 2020-2026 Andy Kurnia.

use super::{error, fash, player};

// { "tag": "simmer", "params": { "num_plies": 2 } }
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PlayerSpec {
    pub tag: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

fn default_num_games() -> u64 {
    10
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct TournamentConfig {
    // text word list or binary index
    pub words: String,
    #[serde(default)]
    pub leaves: Option<String>,
    #[serde(default = "default_num_games")]
    pub num_games: u64,
    #[serde(default)]
    pub num_threads: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
    pub players: [PlayerSpec; 2],
}

impl TournamentConfig {
    pub fn from_json_str(s: &str) -> error::Returns<Self> {
        match serde_json::from_str::<Self>(s) {
            Ok(ret) => Ok(ret),
            Err(err) => {
                return_error!(BadConfig, format!("tournament config: {}", err));
            }
        }
    }

    pub fn from_path(path: &str) -> error::Returns<Self> {
        let s = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(err) => {
                return_error!(Io, format!("{}: {}", path, err));
            }
        };
        Self::from_json_str(&s)
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

pub type Constructor =
    fn(&Registry, &serde_json::Value) -> error::Returns<Box<dyn player::Player>>;

// Missing params mean all defaults.
fn params_of<T: serde::de::DeserializeOwned>(
    tag: &str,
    params: &serde_json::Value,
) -> error::Returns<T> {
    let params = if params.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        params.clone()
    };
    match serde_json::from_value::<T>(params) {
        Ok(ret) => Ok(ret),
        Err(err) => {
            return_error!(BadConfig, format!("{} params: {}", tag, err));
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct NoParams {}

fn default_num_candidates() -> usize {
    10
}

fn default_num_plies() -> usize {
    2
}

fn default_num_iterations() -> usize {
    100
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SimmerParams {
    #[serde(default = "default_num_candidates")]
    num_candidates: usize,
    #[serde(default = "default_num_plies")]
    num_plies: usize,
    #[serde(default = "default_num_iterations")]
    num_iterations: usize,
    #[serde(default)]
    seed: Option<u64>,
}

fn default_max_depth() -> u8 {
    3
}

fn default_max_width() -> usize {
    10
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct EndgameParams {
    #[serde(default = "default_max_depth")]
    max_depth: u8,
    #[serde(default = "default_max_width")]
    max_width: usize,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Rule {
    when: player::Predicate,
    player: PlayerSpec,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SpecializedParams {
    #[serde(default)]
    rules: Vec<Rule>,
    fallback: PlayerSpec,
}

fn make_greedy(
    _registry: &Registry,
    params: &serde_json::Value,
) -> error::Returns<Box<dyn player::Player>> {
    params_of::<NoParams>("greedy", params)?;
    Ok(Box::new(player::Greedy::default()))
}

fn make_passer(
    _registry: &Registry,
    params: &serde_json::Value,
) -> error::Returns<Box<dyn player::Player>> {
    params_of::<NoParams>("passer", params)?;
    Ok(Box::new(player::Passer))
}

fn make_simmer(
    _registry: &Registry,
    params: &serde_json::Value,
) -> error::Returns<Box<dyn player::Player>> {
    let params = params_of::<SimmerParams>("simmer", params)?;
    Ok(Box::new(player::Simmer::new(
        params.num_candidates,
        params.num_plies,
        params.num_iterations,
        params.seed,
    )))
}

fn make_endgame(
    _registry: &Registry,
    params: &serde_json::Value,
) -> error::Returns<Box<dyn player::Player>> {
    let params = params_of::<EndgameParams>("endgame", params)?;
    Ok(Box::new(player::Endgame::new(
        params.max_depth,
        params.max_width,
    )))
}

fn make_specialized(
    registry: &Registry,
    params: &serde_json::Value,
) -> error::Returns<Box<dyn player::Player>> {
    let params = params_of::<SpecializedParams>("specialized", params)?;
    let mut rules = Vec::with_capacity(params.rules.len());
    for rule in params.rules.iter() {
        rules.push((rule.when.clone(), registry.make_player(&rule.player)?));
    }
    Ok(Box::new(player::Specialized {
        rules,
        fallback: registry.make_player(&params.fallback)?,
    }))
}

pub struct Registry {
    constructors: fash::MyHashMap<String, Constructor>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            constructors: Default::default(),
        }
    }

    pub fn with_builtin_players() -> Self {
        let mut ret = Self::new();
        ret.register("greedy", make_greedy);
        ret.register("passer", make_passer);
        ret.register("simmer", make_simmer);
        ret.register("endgame", make_endgame);
        ret.register("specialized", make_specialized);
        ret
    }

    // A later registration of the same tag replaces the earlier one.
    pub fn register(&mut self, tag: &str, constructor: Constructor) {
        self.constructors.insert(tag.to_string(), constructor);
    }

    pub fn tags(&self) -> Vec<&str> {
        let mut v = self.constructors.keys().map(|k| k.as_str()).collect::<Vec<_>>();
        v.sort_unstable();
        v
    }

    pub fn make_player(&self, spec: &PlayerSpec) -> error::Returns<Box<dyn player::Player>> {
        match self.constructors.get(&spec.tag) {
            Some(constructor) => constructor(self, &spec.params),
            None => {
                return_error!(UnknownTag, format!("no player is called {:?}", spec.tag));
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
