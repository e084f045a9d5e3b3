//! Class rendering.
//!
//! Every writer appends to a [`SourceWriter`] at its current indentation.
//! Class bodies are rendered inside a pushed class frame (see
//! [`StubContext::in_class_scope`]) so that generic parameter names and
//! alias lines are derived from the frame stack.

use crate::context::StubContext;
use crate::overloads::{OverloadEntry, dotnet_signature, is_generic_method_callable, operator_name};
use crate::source_writer::SourceWriter;
use crate::type_names::{clean_method_name, clean_type_name, is_reserved_property_name, safe_python_name};
use indexmap::{IndexMap, IndexSet};
use netstub_model::{MethodId, TypeId, Variance, well_known};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::debug;

impl<'u> StubContext<'u> {
    /// Render all types sharing one Python name. A lone non-generic type is
    /// written directly; otherwise a metaclass dispatches `Name[...]` to
    /// the generic variants and the non-generic one becomes `Name_0`.
    pub(crate) fn write_type_group(&mut self, out: &mut SourceWriter, group_name: &str, types: &[TypeId]) {
        let universe = self.universe;
        if let Some(&array) = types.iter().find(|&&ty| universe.is_named(ty, well_known::ARRAY)) {
            self.write_array_type(out, array);
            return;
        }
        if let [single] = types {
            if !universe.is_generic_type_definition(*single) {
                self.write_type(out, *single, None);
                return;
            }
        }

        let meta = format!("{group_name}_GenericClasses");
        let suffix = self.accessible_generic_suffix();
        let generic: Vec<TypeId> = types
            .iter()
            .copied()
            .filter(|&ty| universe.is_generic_type_definition(ty))
            .collect();
        if !generic.is_empty() {
            self.write_type_overload(out, &meta, &generic);
        }

        let mut rest = types.to_vec();
        let non_generic = rest
            .iter()
            .position(|&ty| !universe.is_generic_type_definition(ty))
            .map(|idx| rest.remove(idx));
        match non_generic {
            Some(non_generic) => {
                let renamed = format!("{group_name}_0");
                out.line(&format!("class {group_name}({renamed}, metaclass={meta}{suffix}): ..."));
                self.write_type(out, non_generic, Some(&renamed));
            }
            None => out.line(&format!("{group_name} : {meta}{suffix}")),
        }
        for ty in rest {
            self.write_type(out, ty, None);
        }
    }

    /// `System.Array` doubles as the generic `Array_1[T]` used for every
    /// array type, so its group is written from a fixed template.
    fn write_array_type(&mut self, out: &mut SourceWriter, array: TypeId) {
        out.blank_line();
        out.line("class Array_GenericClasses(abc.ABCMeta):");
        out.increase_indent();
        out.line("Generic_Array_1_T = typing.TypeVar('Generic_Array_1_T')");
        out.line(
            "def __getitem__(self, types : typing.Type[Generic_Array_1_T]) -> typing.Type[Array_1[Generic_Array_1_T]]: ...",
        );
        out.decrease_indent();
        out.blank_line();
        out.line("class Array(Array_0, metaclass=Array_GenericClasses): ...");
        out.blank_line();
        out.line("Array_1_T = typing.TypeVar('Array_1_T', covariant=True)");
        out.line("class Array_1(Array_0, typing.Generic[Array_1_T]):...");
        out.blank_line();
        self.write_type(out, array, Some("Array_0"));
    }

    /// `[A, B]` for the generics accessible in the current frame, or empty.
    fn accessible_generic_suffix(&mut self) -> String {
        let generics = self.class_scopes.accessible_generics();
        if generics.is_empty() {
            return String::new();
        }
        let names: Vec<String> = generics.iter().map(|&g| self.resolve(g, true)).collect();
        format!("[{}]", names.join(", "))
    }

    /// The metaclass whose `__getitem__` overloads map type arguments to
    /// the generic variants of a type group.
    fn write_type_overload(&mut self, out: &mut SourceWriter, meta: &str, generic_types: &[TypeId]) {
        let universe = self.universe;
        out.blank_line();
        let external = self.class_scopes.accessible_generics();
        self.in_class_scope(out, meta, Vec::new(), false, |ctx, out| {
            ctx.write_class_header(out, meta, vec!["abc.ABCMeta".to_string()], None);
            for &ty in generic_types {
                let all = universe.generic_arguments(ty);
                let args = &all[external.len().min(all.len())..];
                let target = ctx.resolve(ty, false);
                let type_vars: Vec<String> = args
                    .iter()
                    .map(|&arg| format!("Generic_{}", ctx.resolve(arg, true)))
                    .collect();
                let mut all_vars: Vec<String> = external.iter().map(|&g| ctx.resolve(g, true)).collect();
                all_vars.extend(type_vars.iter().cloned());
                let var_list = all_vars.join(", ");

                if args.is_empty() {
                    out.line(&format!("def __call__(self) -> {target}[{var_list}]: ..."));
                    continue;
                }

                let mut indexer = type_vars
                    .iter()
                    .map(|var| format!("typing.Type[{var}]"))
                    .collect::<Vec<_>>()
                    .join(", ");
                if args.len() > 1 {
                    indexer = format!("typing.Tuple[{indexer}]");
                }
                for (&arg, var) in args.iter().zip(&type_vars) {
                    ctx.write_type_var(out, arg, Some(var.clone()), false);
                }
                if generic_types.len() > 1 {
                    out.line("@typing.overload");
                }
                out.line(&format!(
                    "def __getitem__(self, types : {indexer}) -> typing.Type[{target}[{var_list}]]: ..."
                ));
            }
        });
        out.blank_line();
    }

    /// Render one class: header, constructors, fields, properties, methods
    /// and nested type groups, or `pass` when the body is empty.
    pub(crate) fn write_type(&mut self, out: &mut SourceWriter, ty: TypeId, class_name: Option<&str>) {
        let universe = self.universe;
        let Some(def) = universe.definition(ty) else {
            return;
        };
        out.blank_line();
        if def.is_enum() {
            self.write_enum(out, ty);
            out.blank_line();
            return;
        }

        let class_name = class_name.map_or_else(|| clean_type_name(universe, ty), str::to_string);
        let generics = def.generic_params.clone();
        let shadow = !generics.is_empty();
        self.in_class_scope(out, &class_name, generics, shadow, |ctx, out| {
            let arguments = ctx.class_arguments(ty);
            ctx.write_class_header(out, &class_name, arguments, None);
            let mut wrote = false;
            wrote |= ctx.write_constructors(out, ty);
            wrote |= ctx.write_fields(out, ty);
            wrote |= ctx.write_properties(out, ty);
            wrote |= ctx.write_methods(out, ty);
            wrote |= ctx.write_nested_types(out, ty);
            if !wrote {
                out.line("pass");
            }
        });
        out.blank_line();
    }

    /// Write the TypeVars of the accessible generics, the `class` line and
    /// the alias lines re-exporting outer TypeVars, then indent.
    fn write_class_header(
        &mut self,
        out: &mut SourceWriter,
        class_name: &str,
        mut arguments: Vec<String>,
        aliases: Option<&IndexMap<TypeId, String>>,
    ) {
        let generics = self.class_scopes.accessible_generics();
        let alias_of = |g: &TypeId| aliases.and_then(|a| a.get(g)).cloned();

        let mut declared = FxHashSet::default();
        for g in &generics {
            match alias_of(g) {
                Some(alias) => {
                    if declared.insert(alias.clone()) {
                        self.write_type_var(out, *g, Some(alias), true);
                    }
                }
                None => self.write_type_var(out, *g, None, true),
            }
        }

        if !generics.is_empty() {
            let mut names = IndexSet::new();
            for g in &generics {
                let name = match alias_of(g) {
                    Some(alias) => alias,
                    None => self.resolve(*g, true),
                };
                names.insert(name);
            }
            let names: Vec<String> = names.into_iter().collect();
            arguments.insert(0, format!("typing.Generic[{}]", names.join(", ")));
        }

        if arguments.is_empty() {
            out.line(&format!("class {class_name}:"));
        } else {
            out.line(&format!("class {class_name}({}):", arguments.join(", ")));
        }
        out.increase_indent();

        let accessor = self
            .class_scopes
            .current()
            .map(|frame| frame.outside_accessor.clone())
            .unwrap_or_default();
        if accessor.is_empty() {
            return;
        }
        let mut written = IndexSet::new();
        for g in &generics {
            let name = self.resolve(*g, true);
            let outer = alias_of(g).unwrap_or_else(|| name.clone());
            let line = format!("{name} = {accessor}{outer}");
            if written.insert(line.clone()) {
                out.line(&line);
            }
        }
    }

    fn write_type_var(&mut self, out: &mut SourceWriter, param: TypeId, name: Option<String>, with_variance: bool) {
        let line = self.type_var_line(param, name, with_variance);
        out.line(&line);
    }

    fn type_var_line(&mut self, param: TypeId, name: Option<String>, with_variance: bool) -> String {
        let universe = self.universe;
        let name = name.unwrap_or_else(|| self.resolve(param, true));
        let mut line = format!("{name} = typing.TypeVar('{name}'");
        if with_variance {
            match universe.generic_param(param).map(|p| p.variance) {
                Some(Variance::Contravariant) => line.push_str(", contravariant=True"),
                Some(Variance::Covariant) => line.push_str(", covariant=True"),
                _ => {}
            }
        }
        if let Some(bound) = self.type_var_bound(param) {
            line.push_str(", bound=");
            line.push_str(&bound);
        }
        line.push(')');
        line
    }

    /// Base list of a class: the base type, the interfaces not implied by
    /// another entry (deepest first), and the protocol/ABC marker.
    fn class_arguments(&mut self, ty: TypeId) -> Vec<String> {
        let universe = self.universe;
        let Some(def) = universe.definition(ty) else {
            return Vec::new();
        };
        let mut arguments = Vec::new();

        let base = def.base;
        let explicit_base = base.filter(|&b| {
            !universe.is_named(b, well_known::OBJECT) && !universe.is_named(b, well_known::VALUE_TYPE)
        });
        if let Some(base) = explicit_base {
            let mut name = self.resolve(base, true);
            if self.is_overloaded_non_generic(base) {
                name.push_str("_0");
            }
            arguments.push(name);
        }

        let mut interfaces: Vec<TypeId> = universe.interfaces_of(ty).to_vec();
        interfaces.sort_by_cached_key(|&iface| Reverse(self.interface_depth(iface)));
        let mut implied: FxHashSet<TypeId> = FxHashSet::default();
        if let Some(base) = base {
            implied.extend(universe.interfaces_of(base).iter().copied());
        }
        for &iface in &interfaces {
            implied.extend(universe.interfaces_of(iface).iter().copied().filter(|&i| i != iface));
        }
        for iface in interfaces {
            if !universe.is_visible(universe.generic_definition(iface)) || implied.contains(&iface) {
                continue;
            }
            let mut name = self.resolve(iface, true);
            if self.is_overloaded_non_generic(iface) {
                name.push_str("_0");
            }
            arguments.push(name);
        }

        if def.is_interface() {
            arguments.push("typing.Protocol".to_string());
        } else if def.is_abstract {
            let base_is_abstract = base
                .and_then(|b| universe.definition(universe.generic_definition(b)))
                .is_some_and(|b| b.is_abstract);
            if !base_is_abstract {
                arguments.push("abc.ABC".to_string());
            }
        }
        arguments
    }

    /// 0 for a type without interfaces, else one more than its deepest one.
    fn interface_depth(&mut self, ty: TypeId) -> u32 {
        if let Some(&depth) = self.interface_depths.get(&ty) {
            return depth;
        }
        let universe = self.universe;
        let depth = universe
            .interfaces_of(ty)
            .iter()
            .map(|&iface| self.interface_depth(iface))
            .max()
            .map_or(0, |deepest| deepest + 1);
        self.interface_depths.insert(ty, depth);
        depth
    }

    fn write_enum(&mut self, out: &mut SourceWriter, ty: TypeId) {
        let universe = self.universe;
        let Some(def) = universe.definition(ty) else {
            return;
        };
        let underlying = match def.enum_underlying {
            Some(underlying) => self.resolve(underlying, true),
            None => "int".to_string(),
        };
        let class_name = clean_type_name(universe, ty);
        let indent = out.indent_level();
        out.line(&format!("class {class_name}(typing.SupportsInt):"));
        out.increase_indent();
        out.line("@typing.overload");
        out.line(&format!("def __init__(self, value : {underlying}) -> None: ..."));
        out.line("@typing.overload");
        out.line(&format!("def __init__(self, value : {underlying}, force_if_true: bool) -> None: ..."));
        out.line("def __int__(self) -> int: ...");
        out.blank_line();
        out.line("# Values:");
        let value_type = self.resolve(ty, true);
        for value in &def.enum_values {
            out.line(&format!("{} : {value_type} # {}", safe_python_name(&value.name), value.value));
        }
        out.set_indent_level(indent);
    }

    fn write_constructors(&mut self, out: &mut SourceWriter, ty: TypeId) -> bool {
        let universe = self.universe;
        let Some(def) = universe.definition(ty) else {
            return false;
        };
        if def.constructors.is_empty() {
            return false;
        }
        let group = self.arrange_overloads(&def.constructors);
        let overloaded = group.is_overloaded();
        let mut wrote = false;
        for entry in &group.entries {
            match *entry {
                OverloadEntry::Member(id) => wrote |= self.write_simple_method(out, id, overloaded),
                OverloadEntry::Collision(id) => out.line(&self.collision_comment(id)),
            }
        }
        wrote
    }

    fn write_fields(&mut self, out: &mut SourceWriter, ty: TypeId) -> bool {
        let universe = self.universe;
        let Some(def) = universe.definition(ty) else {
            return false;
        };
        let mut fields: Vec<_> = def.fields.iter().collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        for field in &fields {
            let field_type = self.resolve(field.ty, true);
            out.line(&format!("{} : {field_type}", field.name));
        }
        !fields.is_empty()
    }

    fn write_properties(&mut self, out: &mut SourceWriter, ty: TypeId) -> bool {
        let universe = self.universe;
        let Some(def) = universe.definition(ty) else {
            return false;
        };
        let mut properties: Vec<_> = def.properties.iter().collect();
        properties.sort_by(|a, b| a.name.cmp(&b.name));
        for property in &properties {
            let name = &property.name;
            if is_reserved_property_name(name) {
                out.line(&format!(
                    "# Skipped property {name} since it is a reserved python word. Use reflection to access."
                ));
                continue;
            }
            let receiver = if property.is_static { "cls" } else { "self" };
            let property_type = self.resolve(property.ty, true);
            let getter_type = if property.can_read { property_type.as_str() } else { "None" };
            if property.is_static {
                out.line("@classmethod");
            }
            out.line("@property");
            out.line(&format!("def {name}({receiver}) -> {getter_type}: ..."));
            if property.can_write {
                if property.is_static {
                    out.line("@classmethod");
                }
                out.line(&format!("@{name}.setter"));
                out.line(&format!("def {name}({receiver}, value: {property_type}) -> None: ..."));
            }
        }
        !properties.is_empty()
    }

    /// Declared methods, grouped by name. Plain overload sets are written
    /// as direct `@typing.overload` defs; a set containing a generic method
    /// becomes a `Name_MethodGroup` dispatch class.
    fn write_methods(&mut self, out: &mut SourceWriter, ty: TypeId) -> bool {
        let universe = self.universe;
        let Some(def) = universe.definition(ty) else {
            return false;
        };
        let mut methods: Vec<MethodId> = def
            .methods
            .iter()
            .copied()
            .filter(|&id| {
                let method = universe.method(id);
                !method.is_property_accessor() && method.name != "<Clone>$"
            })
            .collect();
        self.sort_members(&mut methods);

        let mut groups: IndexMap<&str, Vec<MethodId>> = IndexMap::new();
        for &id in &methods {
            groups.entry(universe.method(id).non_generic_name()).or_default().push(id);
        }
        let is_dispatch = |members: &[MethodId]| {
            members
                .iter()
                .any(|&id| universe.method(id).is_generic_definition())
        };
        let mut groups: Vec<(&str, Vec<MethodId>)> = groups.into_iter().collect();
        groups.sort_by_key(|(_, members)| is_dispatch(members.as_slice()));

        let mut wrote = false;
        for (name, members) in groups {
            if !is_dispatch(members.as_slice()) {
                let group = self.arrange_overloads(&members);
                let overloaded = group.is_overloaded();
                for entry in &group.entries {
                    match *entry {
                        OverloadEntry::Member(id) => wrote |= self.write_simple_method(out, id, overloaded),
                        OverloadEntry::Collision(id) => out.line(&self.collision_comment(id)),
                    }
                }
                continue;
            }
            let static_abstract = members.iter().any(|&id| {
                let method = universe.method(id);
                method.is_static && method.is_abstract
            });
            if def.is_interface() && static_abstract {
                debug!(ty = %def.full_name, method = name, "skipping static abstract generic interface method");
                out.line(&format!("# Skipped {name} due to it being static, abstract and generic."));
                continue;
            }
            self.write_method_group(out, name, &members);
            wrote = true;
        }

        if universe.is_named(ty, well_known::ENUMERABLE) {
            out.line("def __iter__(self) -> typing.Iterator[typing.Any]: ...");
            wrote = true;
        } else if universe.is_named(ty, well_known::GENERIC_ENUMERABLE) {
            if let Some(&element) = def.generic_params.first() {
                let element = self.resolve(element, true);
                out.line(&format!("def __iter__(self) -> typing.Iterator[{element}]: ..."));
                wrote = true;
            }
        }
        wrote
    }

    fn write_nested_types(&mut self, out: &mut SourceWriter, ty: TypeId) -> bool {
        let universe = self.universe;
        let Some(def) = universe.definition(ty) else {
            return false;
        };
        let mut groups: BTreeMap<&str, Vec<TypeId>> = BTreeMap::new();
        for &nested in &def.nested_types {
            if let Some(nested_def) = universe.definition(nested).filter(|_| universe.is_visible(nested)) {
                groups.entry(nested_def.non_generic_name()).or_default().push(nested);
            }
        }
        for (name, members) in &mut groups {
            members.sort_by(|&a, &b| universe.raw_name(a).cmp(&universe.raw_name(b)));
            self.write_type_group(out, name, members);
        }
        !groups.is_empty()
    }

    /// `Name : Name_MethodGroup` plus the dispatch class holding the
    /// `__getitem__` accessors for generic variants and the `__call__`
    /// overloads.
    fn write_method_group(&mut self, out: &mut SourceWriter, name: &str, members: &[MethodId]) {
        let universe = self.universe;
        out.blank_line();
        let class_name = format!("{name}_MethodGroup");
        let suffix = self.accessible_generic_suffix();
        out.line(&format!("{name} : {class_name}{suffix}"));

        self.in_class_scope(out, &class_name, Vec::new(), false, |ctx, out| {
            ctx.write_class_header(out, &class_name, Vec::new(), None);

            let mut by_bounds: IndexMap<String, Vec<MethodId>> = IndexMap::new();
            for &id in members {
                if universe.method(id).is_generic_definition() {
                    let key = ctx.bounds_key(id);
                    by_bounds.entry(key).or_default().push(id);
                }
            }
            let has_overloads = by_bounds.len() > 1;
            let mut accessor_names = FxHashSet::default();
            for methods in by_bounds.values() {
                ctx.write_generic_method_accessors(out, methods, has_overloads, &mut accessor_names);
            }

            // Type variables of different methods can render to the same
            // name. A method whose declarations would clash with ones
            // already written is left to its accessor.
            let mut declared: FxHashMap<String, String> = FxHashMap::default();
            let mut clashing = FxHashSet::default();
            for &id in members {
                let method = universe.method(id);
                if !method.is_generic_definition() || !is_generic_method_callable(universe, method) {
                    continue;
                }
                let vars: Vec<(String, String)> = method
                    .generic_params
                    .iter()
                    .map(|&param| {
                        let var = ctx.resolve(param, true);
                        let line = ctx.type_var_line(param, Some(var.clone()), true);
                        (var, line)
                    })
                    .collect();
                if vars.iter().any(|(var, line)| declared.get(var).is_some_and(|d| d != line)) {
                    debug!(method = %method.name, "type variables clash with another overload");
                    clashing.insert(id);
                    continue;
                }
                for (var, line) in vars {
                    if !declared.contains_key(&var) {
                        out.line(&line);
                        declared.insert(var, line);
                    }
                }
            }
            for line in ctx.method_callers(members, false, &clashing) {
                out.line(&line);
            }
        });
        out.blank_line();
    }

    /// `__getitem__` for one bound group of generic methods and the class
    /// it returns, whose `__call__` overloads are the methods themselves.
    fn write_generic_method_accessors(
        &mut self,
        out: &mut SourceWriter,
        methods: &[MethodId],
        has_overloads: bool,
        used_names: &mut FxHashSet<String>,
    ) {
        let universe = self.universe;
        let Some(&template) = methods.first() else {
            return;
        };
        let template = universe.method(template);
        let base_name = clean_method_name(template);
        let mut class_name = base_name.clone();
        let mut attempt = 2;
        while !used_names.insert(class_name.clone()) {
            class_name = format!("{base_name}_{attempt}");
            attempt += 1;
        }

        let arity = template.generic_params.len();
        let alias_names: Vec<String> = (1..=arity).map(|i| format!("{class_name}_T{i}")).collect();
        let mut aliases: IndexMap<TypeId, String> = IndexMap::new();
        for (position, alias) in alias_names.iter().enumerate() {
            for &id in methods {
                if let Some(&param) = universe.method(id).generic_params.get(position) {
                    aliases.entry(param).or_insert_with(|| alias.clone());
                }
            }
        }

        let indexer = alias_names
            .iter()
            .map(|alias| format!("typing.Type[{alias}]"))
            .collect::<Vec<_>>()
            .join(", ");
        let indexer = if arity == 1 { indexer } else { format!("typing.Tuple[{indexer}]") };
        let outer = self.class_scopes.accessible_generics();
        let mut generic_args: Vec<String> = outer.iter().map(|&g| self.resolve(g, true)).collect();
        generic_args.extend(alias_names.iter().cloned());

        if has_overloads {
            out.line("@typing.overload");
        }
        out.line(&format!(
            "def __getitem__(self, t:{indexer}) -> {class_name}[{}]: ...",
            generic_args.join(", ")
        ));
        out.blank_line();

        let keys: Vec<TypeId> = aliases.keys().copied().collect();
        self.in_class_scope(out, &class_name, keys, false, |ctx, out| {
            ctx.write_class_header(out, &class_name, Vec::new(), Some(&aliases));
            for line in ctx.method_callers(methods, true, &FxHashSet::default()) {
                out.line(&line);
            }
        });
        out.blank_line();
    }

    /// `__call__` lines for the members of a method group, deduplicated by
    /// signature. Outside an accessor class, generic methods whose type
    /// parameters cannot be inferred, and those in `clashing`, are replaced
    /// by a comment.
    fn method_callers(
        &mut self,
        members: &[MethodId],
        in_accessor: bool,
        clashing: &FxHashSet<MethodId>,
    ) -> Vec<String> {
        enum Caller {
            Call(String),
            Comment(String),
        }
        let universe = self.universe;
        let mut callers = Vec::new();
        let mut seen = FxHashSet::default();
        for &id in members {
            let method = universe.method(id);
            if !in_accessor && method.is_generic_definition() && !is_generic_method_callable(universe, method) {
                callers.push(Caller::Comment(format!(
                    "# Method {}({}) is only callable as {}[...] since its type parameters cannot be inferred from its arguments",
                    method.name,
                    dotnet_signature(universe, method, " : "),
                    method.non_generic_name()
                )));
                debug!(method = %method.name, "generic method left out of direct calls");
                continue;
            }
            if clashing.contains(&id) {
                callers.push(Caller::Comment(format!(
                    "# Method {}({}) is only callable as {}[...] since its type variables clash with another overload",
                    method.name,
                    dotnet_signature(universe, method, " : "),
                    method.non_generic_name()
                )));
                continue;
            }
            let return_type = self.resolve_return(method.return_type);
            let parameters = self.parameter_list(id, true);
            let signature = self.unique_signature(id);
            if !seen.insert(signature) {
                callers.push(Caller::Comment(self.collision_comment(id)));
                continue;
            }
            callers.push(Caller::Call(format!("def __call__({parameters}) -> {return_type}:...")));
        }

        let calls = callers.iter().filter(|c| matches!(c, Caller::Call(_))).count();
        let mut lines = Vec::with_capacity(callers.len() * 2);
        for caller in callers {
            match caller {
                Caller::Call(line) => {
                    if calls > 1 {
                        lines.push("@typing.overload".to_string());
                    }
                    lines.push(line);
                }
                Caller::Comment(line) => lines.push(line),
            }
        }
        lines
    }

    /// A constructor, operator or ordinary method as a single `def`.
    /// Returns false when nothing but a comment was written.
    fn write_simple_method(&mut self, out: &mut SourceWriter, id: MethodId, overloaded: bool) -> bool {
        let universe = self.universe;
        let method = universe.method(id);
        let is_operator = method.is_operator();
        let is_static = method.is_static && !is_operator;

        let name = if method.is_constructor {
            "__init__"
        } else if is_operator {
            match operator_name(&method.name) {
                Some(dunder) => dunder,
                None => {
                    debug!(operator = %method.name, "operator has no python counterpart");
                    out.line(&format!(
                        "# Operator not supported {}({})",
                        method.name,
                        dotnet_signature(universe, method, ": ")
                    ));
                    return false;
                }
            }
        } else {
            method.name.as_str()
        };

        let return_type = if method.is_constructor {
            "None".to_string()
        } else {
            self.resolve_return(method.return_type)
        };
        let parameters = self.parameter_list(id, !is_static);
        if overloaded {
            out.line("@typing.overload");
        }
        if is_static {
            out.line("@staticmethod");
        }
        if method.is_abstract {
            out.line("@abc.abstractmethod");
        }
        out.line(&format!("def {name}({parameters}) -> {return_type}: ..."));
        true
    }

    fn parameter_list(&mut self, id: MethodId, with_self: bool) -> String {
        let universe = self.universe;
        let mut parameters = Vec::new();
        if with_self {
            parameters.push("self".to_string());
        }
        for parameter in &universe.method(id).parameters {
            let ty = self.resolve(parameter.ty, true);
            let default = if parameter.has_default { " = ..." } else { "" };
            parameters.push(format!("{}: {ty}{default}", safe_python_name(&parameter.name)));
        }
        parameters.join(", ")
    }
}
