//! The injector: discover → resolve names → bind, for one marker kind.
//!
//! Discovery and naming failures abort the pass and are returned unchanged. Failures while assigning a value into
//! one member are logged, recorded in the [`InjectionReport`], and the pass moves on to the next member.

use std::any::{Any, type_name};

use tracing::{debug, warn};

use crate::binding::lookup::ResourceLookup;
use crate::binding::report::{Binding, InjectionReport};
use crate::config::InjectionConfig;
use crate::descriptor::{MemberScope, Reflect, TypeDescriptor, ValueType};
use crate::diagnostics::{BindError, ConfigError, DiscoveryError};
use crate::discovery::validator::ensure_distinct;
use crate::discovery::{DiscoveredMember, HierarchyScanner, MarkerPredicate, StructuralValidator, TypeFilter};
use crate::naming::{BindingName, MarkerNameResolver, NameResolver};

/// Inject values into the members of live instances that carry one marker kind.
#[derive(Debug, Clone)]
pub struct Injector {
    marker: String,
    config: InjectionConfig,
    predicate: MarkerPredicate,
    validator: StructuralValidator,
    resolver: MarkerNameResolver,
}

impl Injector {
    /// Injector for `marker` with the default configuration.
    pub fn new(marker: impl AsRef<str>) -> Result<Self, ConfigError> {
        Self::with_config(marker, InjectionConfig::default())
    }

    pub fn with_config(marker: impl AsRef<str>, config: InjectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let marker = marker.as_ref();
        let predicate = MarkerPredicate::new(marker)?;
        let validator = StructuralValidator::new(marker)?;
        let resolver = MarkerNameResolver::from_config(marker, &config)?;
        Ok(Self {
            marker: predicate.marker().to_string(),
            config,
            predicate,
            validator,
            resolver,
        })
    }

    /// Canonical marker kind this injector binds.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn config(&self) -> &InjectionConfig {
        &self.config
    }

    /// Discover and name every member of `root` (and its ancestors) this injector would bind.
    ///
    /// Fields come first, then setters; within each pass the scanned type's members precede its ancestors'.
    ///
    /// ## Errors
    /// - any structural or naming violation;
    /// - `EmptyMatchSet` when `require_match` is set and nothing matched;
    /// - `DuplicateBindingName` when `distinct_names` is set and two members share a name.
    pub fn plan(
        &self,
        root: &'static TypeDescriptor,
        filter: Option<TypeFilter>,
    ) -> Result<Vec<Binding>, DiscoveryError> {
        let accepts = filter.and_then(|filter| filter.included()).map(|ty| ty.name());
        let predicate = self.predicate.clone().with_filter(filter);
        let mut members: Vec<DiscoveredMember> = Vec::new();
        for scope in [MemberScope::Fields, MemberScope::Setters] {
            let scanner = HierarchyScanner::new(scope, &predicate, &self.validator);
            members.extend(scanner.discover(Some(root))?);
        }

        if self.config.require_match && members.is_empty() {
            return Err(DiscoveryError::EmptyMatchSet {
                owner: root.name(),
                marker: self.marker.clone(),
                accepts,
            });
        }

        let plan = members
            .into_iter()
            .map(|member| {
                let name = self.resolver.resolve_name(&member)?;
                Ok(Binding { member, name })
            })
            .collect::<Result<Vec<_>, DiscoveryError>>()?;

        if self.config.distinct_names {
            ensure_distinct(plan.iter().map(|binding| (&binding.member, &binding.name)))?;
        }
        Ok(plan)
    }

    /// Bind `value` into every marked member of `instance` whose value type is exactly `V`.
    ///
    /// Each member receives its own clone of `value`.
    #[tracing::instrument(
        skip_all,
        fields(marker = %self.marker, target = instance.type_descriptor().name(), value = type_name::<V>())
    )]
    pub fn inject<V: Any>(&self, instance: &mut dyn Reflect, value: &V) -> Result<InjectionReport, DiscoveryError> {
        let filter = TypeFilter::include(ValueType::reference::<V>());
        let plan = self.plan(instance.type_descriptor(), Some(filter))?;
        Ok(apply(instance, plan, |_| Ok(value as &dyn Any)))
    }

    /// Bind every marked member of `instance` to the resource registered under its binding name.
    ///
    /// A name with no resource, or a resource of the wrong type, skips that member.
    #[tracing::instrument(skip_all, fields(marker = %self.marker, target = instance.type_descriptor().name()))]
    pub fn inject_resources(
        &self,
        instance: &mut dyn Reflect,
        resources: &dyn ResourceLookup,
    ) -> Result<InjectionReport, DiscoveryError> {
        let plan = self.plan(instance.type_descriptor(), None)?;
        Ok(apply(instance, plan, |name| {
            resources
                .lookup(name)
                .ok_or_else(|| BindError::MissingResource(name.to_string()))
        }))
    }
}

fn apply<'v>(
    instance: &mut dyn Reflect,
    plan: Vec<Binding>,
    mut value_for: impl FnMut(&BindingName) -> Result<&'v dyn Any, BindError>,
) -> InjectionReport {
    let mut report = InjectionReport::new(instance.type_descriptor().name());
    for binding in plan {
        let outcome = match value_for(&binding.name) {
            Ok(value) => bind(&mut *instance, &binding.member, value),
            Err(error) => Err(error),
        };
        match outcome {
            Ok(()) => {
                debug!(member = %binding.member.qualified_name(), name = %binding.name, "bound member");
                report.push_bound(binding);
            }
            Err(error) => {
                warn!(
                    member = %binding.member.qualified_name(),
                    name = %binding.name,
                    %error,
                    "could not bind member, skipping"
                );
                report.push_skipped(binding, error);
            }
        }
    }
    report
}

/// Assign `value` into one discovered member of `instance` through its binding capability.
///
/// `member.depth` parent links are followed from `instance` to reach the part that declares the member.
pub fn bind(instance: &mut dyn Reflect, member: &DiscoveredMember, value: &dyn Any) -> Result<(), BindError> {
    let accessor = member.member.accessor.ok_or(BindError::Inaccessible)?;
    let target = reach(instance, member.depth)?;
    accessor(target, value)
}

fn reach(instance: &mut dyn Reflect, depth: usize) -> Result<&mut dyn Any, BindError> {
    let mut level = instance.type_descriptor();
    let mut target = instance.as_any_mut();
    for step in 1..=depth {
        let link = *level
            .parent_link()
            .ok_or(BindError::AncestorUnreachable { depth: step })?;
        target = link
            .upcast(target)
            .ok_or(BindError::AncestorUnreachable { depth: step })?;
        level = link.descriptor();
    }
    Ok(target)
}
