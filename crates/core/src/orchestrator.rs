//! Generation run: derive once per route, fan out to every enabled adapter.
//!
//! The pipeline is:
//! 1. Validate: duplicate routes, identifier collisions (run-fatal)
//! 2. Derive: identifier, binding signature, cache key per route
//! 3. Declarations: named types plus per-route `Args` / `Response`
//! 4. Adapters: one output unit each; a convention violation only fails its
//!    own adapter
//!
//! Nothing is written anywhere. Everything is buffered in the returned
//! [`Generation`].

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use routegen_common::{AdapterKind, GeneratorConfig, Route, RouteId, RouteTable};
use tracing::{debug, info, warn};

use crate::adapter::descriptor;
use crate::emitter::declare::{emit_named_type, emit_route_declarations};
use crate::emitter::{Artifact, EmitOptions, ImportKind, ImportNeed, RouteContext, emit_route};
use crate::error::GenerateError;
use crate::ident::{self, Identifier};
use crate::ir::{Emit, TsImport};
use crate::key::{CacheKeyExpr, derive_key};
use crate::signature::{self, BindingSignature};

/// Which module an output unit becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnitTarget {
    /// Shared type declarations
    Declarations,
    /// One adapter's bindings
    Adapter(AdapterKind),
}

impl fmt::Display for UnitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitTarget::Declarations => f.write_str("declarations"),
            UnitTarget::Adapter(kind) => write!(f, "{kind} bindings"),
        }
    }
}

/// One generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    /// What the unit is
    pub target: UnitTarget,
    /// Import statements, grouped per module
    pub imports: Vec<TsImport>,
    /// Artifacts in route order
    pub artifacts: Vec<Artifact>,
}

impl OutputUnit {
    /// Every symbol the unit exports, in artifact order.
    pub fn exports(&self) -> impl Iterator<Item = &str> {
        self.artifacts
            .iter()
            .flat_map(|a| a.exports.iter().map(String::as_str))
    }

    /// Artifact by primary name.
    pub fn artifact(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.name == name)
    }

    /// Module text: imports, then artifacts separated by blank lines.
    pub fn render(&self) -> String {
        let mut output = String::new();

        for import in &self.imports {
            output.push_str(&import.emit());
        }
        if !self.imports.is_empty() && !self.artifacts.is_empty() {
            output.push('\n');
        }

        let sources: Vec<&str> = self.artifacts.iter().map(|a| a.source.as_str()).collect();
        output.push_str(&sources.join("\n"));
        output
    }
}

/// Result of one adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterOutput {
    /// Which adapter
    pub adapter: AdapterKind,
    /// Its unit, or the convention violation that stopped it
    pub result: Result<OutputUnit, GenerateError>,
}

/// Everything produced by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Shared declarations unit
    pub declarations: OutputUnit,
    /// Adapter outputs in configuration order
    pub adapters: Vec<AdapterOutput>,
}

impl Generation {
    /// Output of one adapter, if it was enabled.
    pub fn adapter(&self, kind: AdapterKind) -> Option<&AdapterOutput> {
        self.adapters.iter().find(|a| a.adapter == kind)
    }

    /// Unit of one adapter, if it was enabled and succeeded.
    pub fn unit(&self, kind: AdapterKind) -> Option<&OutputUnit> {
        self.adapter(kind).and_then(|a| a.result.as_ref().ok())
    }
}

/// Per-route values shared by every adapter.
struct Derived<'a> {
    route: &'a Route,
    identifier: Identifier,
    signature: BindingSignature,
    key: CacheKeyExpr,
}

impl Derived<'_> {
    fn context(&self) -> RouteContext<'_> {
        RouteContext {
            route: self.route,
            identifier: &self.identifier,
            signature: &self.signature,
            key: &self.key,
        }
    }
}

/// Derive identifiers, signatures and keys, rejecting duplicate routes and
/// identifier collisions.
fn derive_all(table: &RouteTable) -> Result<Vec<Derived<'_>>, GenerateError> {
    let mut seen: HashSet<RouteId> = HashSet::with_capacity(table.routes.len());
    let mut claimed: HashMap<String, RouteId> = HashMap::with_capacity(table.routes.len());
    let mut derived = Vec::with_capacity(table.routes.len());

    for route in &table.routes {
        let id = route.id();
        if !seen.insert(id.clone()) {
            return Err(GenerateError::DuplicateRoute { route: id });
        }

        let identifier = ident::derive(route.method, &route.path)?;
        let call_name = identifier.call_name();
        if let Some(first) = claimed.get(&call_name) {
            return Err(GenerateError::IdentifierCollision {
                identifier: call_name,
                first: first.clone(),
                second: id,
            });
        }

        let signature = signature::resolve(route)?;
        let key = derive_key(&route.path, signature.accepts_argument())
            .map_err(|err| err.at(id.clone()))?;

        debug!(
            route = %id,
            identifier = %call_name,
            accepts_argument = signature.accepts_argument(),
            "Derived route bindings."
        );
        claimed.insert(call_name, id);
        derived.push(Derived {
            route,
            identifier,
            signature,
            key,
        });
    }

    Ok(derived)
}

/// Group import needs into one value and one type-only import per module.
fn collect_imports(needs: &BTreeSet<ImportNeed>) -> Vec<TsImport> {
    #[derive(Default)]
    struct Group {
        default: Option<String>,
        values: Vec<String>,
        types: Vec<String>,
    }

    let mut groups: BTreeMap<&str, Group> = BTreeMap::new();
    for need in needs {
        let group = groups.entry(need.module.as_str()).or_default();
        match need.kind {
            ImportKind::Default => {
                group.default.get_or_insert_with(|| need.name.clone());
            }
            ImportKind::Value => group.values.push(need.name.clone()),
            ImportKind::Type => group.types.push(need.name.clone()),
        }
    }

    let mut imports = Vec::new();
    for (module, group) in groups {
        if group.default.is_some() || !group.values.is_empty() {
            imports.push(TsImport {
                default: group.default,
                items: group.values,
                from: module.to_string(),
                type_only: false,
            });
        }
        if !group.types.is_empty() {
            imports.push(TsImport {
                default: None,
                items: group.types,
                from: module.to_string(),
                type_only: true,
            });
        }
    }
    imports
}

/// Accumulates artifacts of one unit, rejecting duplicate exports.
struct UnitBuilder {
    target: UnitTarget,
    owners: HashMap<String, String>,
    needs: BTreeSet<ImportNeed>,
    artifacts: Vec<Artifact>,
}

impl UnitBuilder {
    fn new(target: UnitTarget) -> Self {
        Self {
            target,
            owners: HashMap::new(),
            needs: BTreeSet::new(),
            artifacts: Vec::new(),
        }
    }

    fn push(&mut self, artifact: Artifact) -> Result<(), GenerateError> {
        for export in &artifact.exports {
            if let Some(first) = self.owners.get(export) {
                return Err(GenerateError::ExportCollision {
                    unit: self.target.to_string(),
                    name: export.clone(),
                    first: first.clone(),
                    second: artifact.name.clone(),
                });
            }
            self.owners.insert(export.clone(), artifact.name.clone());
        }
        self.needs.extend(artifact.imports.iter().cloned());
        self.artifacts.push(artifact);
        Ok(())
    }

    fn finish(self) -> OutputUnit {
        OutputUnit {
            target: self.target,
            imports: collect_imports(&self.needs),
            artifacts: self.artifacts,
        }
    }
}

fn declarations_unit(
    table: &RouteTable,
    derived: &[Derived<'_>],
) -> Result<OutputUnit, GenerateError> {
    let mut unit = UnitBuilder::new(UnitTarget::Declarations);
    for def in &table.types {
        unit.push(emit_named_type(def))?;
    }
    for entry in derived {
        unit.push(emit_route_declarations(&entry.context()))?;
    }
    Ok(unit.finish())
}

/// Build one adapter's unit.
///
/// The outer `Result` carries run-fatal errors, the inner one an
/// adapter-scoped failure.
fn adapter_unit(
    kind: AdapterKind,
    derived: &[Derived<'_>],
    opts: &EmitOptions<'_>,
) -> Result<Result<OutputUnit, GenerateError>, GenerateError> {
    let descriptor = descriptor(kind);
    let mut unit = UnitBuilder::new(UnitTarget::Adapter(kind));

    for entry in derived {
        let artifacts = match emit_route(&descriptor, &entry.context(), opts) {
            Ok(artifacts) => artifacts,
            Err(err) if err.is_adapter_scoped() => return Ok(Err(err)),
            Err(err) => return Err(err),
        };
        for artifact in artifacts {
            unit.push(artifact)?;
        }
    }

    Ok(Ok(unit.finish()))
}

/// Generate declarations and every enabled adapter's bindings.
///
/// Returns `Err` for run-fatal errors; adapter-scoped failures are recorded
/// in that adapter's [`AdapterOutput`].
pub fn generate(table: &RouteTable, config: &GeneratorConfig) -> Result<Generation, GenerateError> {
    info!(
        routes = table.routes.len(),
        types = table.types.len(),
        adapters = config.adapters.len(),
        "Generating client bindings."
    );

    let derived = derive_all(table)?;
    let declarations = declarations_unit(table, &derived)?;
    let opts = EmitOptions::from(config);

    let mut adapters = Vec::with_capacity(config.adapters.len());
    for &kind in &config.adapters {
        let result = adapter_unit(kind, &derived, &opts)?;
        match &result {
            Ok(unit) => debug!(
                adapter = %kind,
                artifacts = unit.artifacts.len(),
                "Adapter bindings generated."
            ),
            Err(err) => warn!(adapter = %kind, "Skipping adapter output: {err}"),
        }
        adapters.push(AdapterOutput {
            adapter: kind,
            result,
        });
    }

    info!(
        declarations = declarations.artifacts.len(),
        failed_adapters = adapters.iter().filter(|a| a.result.is_err()).count(),
        "Client bindings generated."
    );

    Ok(Generation {
        declarations,
        adapters,
    })
}
