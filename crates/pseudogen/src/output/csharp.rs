//! C# target.
//!
//! Module-level functions and `main` statements are wrapped in a `Program`
//! class with a `Main` entry point; classes and exceptions are emitted at
//! the top level before it.

use crate::config::LanguageConfig;
use crate::error::{GenerateError, TemplateError};
use crate::middleware::{DeclarationMiddleware, ImportMiddleware, NameCase, NamingMiddleware};
use crate::profile::{Indent, Profile, ProfileBuilder, Switch, TypeSyntax, TypeTable};
use crate::template::{JoinMode, Renderer, single_return};
use crate::traits::Language;
use crate::tree::{Attr, Kind, Node, Tag};

/// Static instance of the C# language for registry.
pub static CSHARP: CSharp = CSharp;

/// The C# target language.
pub struct CSharp;

impl Language for CSharp {
    fn name(&self) -> &'static str {
        "csharp"
    }

    fn extension(&self) -> &'static str {
        "cs"
    }

    fn profile(&self, config: &LanguageConfig) -> Result<Profile, TemplateError> {
        profile(config)
    }
}

const MODULE: &str = "
    %<dependencies:lines>

    %<custom_exceptions:paragraphs>

    %<#class_definitions>

    public class Program
    {
        %<constants:stmts>

        %<#function_definitions>

        public static void Main()
        {
            %<main:stmts>
        }
    }";

const CUSTOM_EXCEPTION: &str = "
    public class %<name> : %<.base>
    {
        public %<name>(string message)
            : base(message)
        {
        }
    }";

const FUNCTION_DEFINITION: &str = "
    static %<@return_type> %<name>(%<#params>)
    {
        %<block:stmts>
    }";

const METHOD_DEFINITION: &str = "
    %<.is_public>%<@return_type> %<name>(%<#params>)
    {
        %<block:stmts>
    }";

const CONSTRUCTOR: &str = "
    public %<@this>(%<#params>)
    {
        %<block:stmts>
    }";

const CLASS_DEFINITION: &str = "
    public class %<name>%<.base>
    {
        %<attrs:lines>

        %<.constructor>

        %<methods:paragraphs>
    }";

const IF_STATEMENT: &str = "
    if (%<test>)
    {
        %<block:stmts>
    }
    %<.otherwise>";

const ELSE_IF_STATEMENT: &str = "
    else if (%<test>)
    {
        %<block:stmts>
    }
    %<.otherwise>";

const ELSE_STATEMENT: &str = "
    else
    {
        %<block:stmts>
    }";

const WHILE_STATEMENT: &str = "
    while (%<test>)
    {
        %<block:stmts>
    }";

const FOR_EACH: &str = "
    foreach (%<iterators> in %<sequences>)
    {
        %<block:stmts>
    }";

const FOR_WITH_INDEX: &str = "
    for (int %<iterators.index> = 0; %<iterators.index> < %<sequences.sequence>.Count; %<iterators.index>++)
    {
        var %<iterators.iterator> = %<sequences.sequence>[%<iterators.index>];
        %<block:stmts>
    }";

const FOR_WITH_ITEMS: &str = "
    foreach (var %<#item_variable> in %<sequences.sequence>)
    {
        var %<iterators.key> = %<#item_variable>.Key;
        var %<iterators.value> = %<#item_variable>.Value;
        %<block:stmts>
    }";

const FOR_ZIP: &str = "
    for (int %<#zip_index> = 0; %<#zip_index> < %<#first_sequence>.Count; %<#zip_index>++)
    {
        %<#zip_iterators>
        %<block:stmts>
    }";

const FOR_RANGE: &str = "
    for (int %<index> = %<.first>; %<index> != %<last>; %<index> += %<.step>)
    {
        %<block:stmts>
    }";

const TRY_STATEMENT: &str = "
    try
    {
        %<block:stmts>
    }
    %<handlers:lines>";

const EXCEPTION_HANDLER: &str = "
    catch (%<.exception> %<instance>)
    {
        %<block:stmts>
    }";

const ARGS: &str = "%<args:join ', '>";

/// Build the C# profile.
pub fn profile(config: &LanguageConfig) -> Result<Profile, TemplateError> {
    let indent = match config.tabs {
        Some(true) => Indent::tabs(),
        _ => Indent::spaces(config.indent.unwrap_or(4)),
    };
    let naming = NamingMiddleware {
        normal: config.naming.normal.unwrap_or(NameCase::Camel),
        method: config.naming.method.unwrap_or(NameCase::Pascal),
        function: config.naming.function.unwrap_or(NameCase::Pascal),
    };

    let builder = Profile::builder("csharp", "cs")
        .indent(indent)
        .terminator(";")
        .middleware(DeclarationMiddleware)
        .middleware(naming)
        .middleware(ImportMiddleware)
        .types(types());
    let builder = library(builder);

    builder
        // Module structure
        .template(Tag::Module, MODULE)
        .template(Tag::Dependency, "using %<name>;")
        .template(
            Tag::Constant,
            "static readonly %<@pseudo_type> %<constant> = %<init>",
        )
        .template(Tag::CustomException, CUSTOM_EXCEPTION)
        .optional(Tag::CustomException, "base", "%<base>", "Exception")
        // Definitions
        .template(Tag::FunctionDefinition, FUNCTION_DEFINITION)
        .template(Tag::MethodDefinition, METHOD_DEFINITION)
        .optional(Tag::MethodDefinition, "is_public", "public ", "private ")
        .template(Tag::Constructor, CONSTRUCTOR)
        .template(Tag::ClassDefinition, CLASS_DEFINITION)
        .optional(Tag::ClassDefinition, "base", "%<#base>", "")
        .optional(Tag::ClassDefinition, "constructor", "%<constructor>", "")
        .template(Tag::ClassAttr, "%<.is_public>%<@pseudo_type> %<name>;")
        .optional(Tag::ClassAttr, "is_public", "public ", "private ")
        .template(
            Tag::AnonymousFunction,
            "(%<params:join ', '>) =>%<#anon_block>",
        )
        // Statements
        .switch(
            Tag::Assignment,
            Switch::on("first_mention")
                .case("true", "var %<target> = %<value>")
                .default("%<target> = %<value>"),
        )
        .template(
            Tag::IndexAssignment,
            "%<sequence>[%<index>] = %<value>",
        )
        .template(Tag::IfStatement, IF_STATEMENT)
        .optional(Tag::IfStatement, "otherwise", "%<otherwise>", "")
        .template(Tag::ElseIfStatement, ELSE_IF_STATEMENT)
        .optional(Tag::ElseIfStatement, "otherwise", "%<otherwise>", "")
        .template(Tag::ElseStatement, ELSE_STATEMENT)
        .template(Tag::WhileStatement, WHILE_STATEMENT)
        .switch(
            Tag::ForStatement,
            Switch::on("iterators")
                .case("for_iterator_with_index", FOR_WITH_INDEX)
                .case("for_iterator_with_items", FOR_WITH_ITEMS)
                .case("for_iterator_zip", FOR_ZIP)
                .default(FOR_EACH),
        )
        .template(Tag::ForIterator, "var %<iterator>")
        .template(Tag::ForSequence, "%<sequence>")
        .template(Tag::ForRangeStatement, FOR_RANGE)
        .optional(Tag::ForRangeStatement, "first", "%<first>", "0")
        .optional(Tag::ForRangeStatement, "step", "%<step>", "1")
        .template(Tag::TryStatement, TRY_STATEMENT)
        .template(Tag::ExceptionHandler, EXCEPTION_HANDLER)
        .optional(Tag::ExceptionHandler, "exception", "%<exception>", "Exception")
        .template(Tag::ThrowStatement, "throw new %<exception>(%<value>)")
        .template(Tag::ImplicitReturn, "return %<value>")
        .template(Tag::ExplicitReturn, "return %<value>")
        .template(Tag::Block, "%<block:stmts>")
        // Literals
        .template(Tag::Int, "%<value>")
        .template(Tag::Float, "%<value>")
        .template(Tag::String, "%<#string_literal>")
        .template(Tag::Boolean, "%<value>")
        .template(Tag::Null, "null")
        .template(Tag::Regex, "new Regex(%<#verbatim_string>)")
        .template(Tag::List, "new %<@pseudo_type> {%<elements:join ', '>}")
        .template(Tag::Dictionary, "new %<@pseudo_type> {%<pairs:join ', '>}")
        .template(Tag::Pair, "{%<key>, %<value>}")
        .template(Tag::Set, "new %<@pseudo_type> {%<elements:join ', '>}")
        .template(Tag::Tuple, "Tuple.Create(%<elements:join ', '>)")
        .template(Tag::Array, "new %<@pseudo_type> {%<elements:join ', '>}")
        // References
        .template(Tag::Local, "%<name>")
        .template(Tag::Typename, "%<name>")
        .template(Tag::InstanceVariable, "this.%<name>")
        .template(Tag::This, "this")
        .template(Tag::Attr, "%<object>.%<attr>")
        .template(Tag::Index, "%<sequence>[%<index>]")
        // Calls and operations
        .template(Tag::Call, "%<function>(%<args:join ', '>)")
        .template(Tag::MethodCall, "%<receiver>.%<message>(%<args:join ', '>)")
        .template(Tag::StaticCall, "%<receiver>.%<message>(%<args:join ', '>)")
        .template(Tag::StandardCall, "%<#standard_call>")
        .template(Tag::StandardMethodCall, "%<#standard_method_call>")
        .template(Tag::NewInstance, "new %<class_name>(%<args:join ', '>)")
        .template(Tag::BinaryOp, "%<#left_operand> %<op> %<#right_operand>")
        .template(Tag::Comparison, "%<#left_operand> %<op> %<#right_operand>")
        .template(Tag::UnaryOp, "%<op>%<#unary_operand>")
        // Overrides
        .override_fn("params", params)
        .override_fn("anon_block", anon_block)
        .override_fn("base", base)
        .override_fn("class_definitions", class_definitions)
        .override_fn("function_definitions", function_definitions)
        .override_fn("item_variable", item_variable)
        .override_fn("zip_index", zip_index)
        .override_fn("first_sequence", first_sequence)
        .override_fn("zip_iterators", zip_iterators)
        .override_fn("string_literal", string_literal)
        .override_fn("verbatim_string", verbatim_string)
        .override_fn("standard_call", standard_call)
        .override_fn("standard_method_call", standard_method_call)
        .override_fn("left_operand", left_operand)
        .override_fn("right_operand", right_operand)
        .override_fn("unary_operand", unary_operand)
        .build()
}

fn types() -> TypeTable {
    TypeTable::new()
        .name("Int", "int")
        .name("Float", "double")
        .name("Boolean", "bool")
        .name("String", "string")
        .name("Void", "void")
        .name("Object", "object")
        .name("Exception", "Exception")
        .name("Regexp", "Regex")
        .format("List", "List<{0}>")
        .format("Dictionary", "Dictionary<{0}, {1}>")
        .format("Set", "HashSet<{0}>")
        .format("Array", "{0}[]")
        .variadic("Tuple", "Tuple<{0}>", ", ")
        .with(
            "Function",
            TypeSyntax::Callable {
                format: "Func<{0}>".into(),
                procedure: "Action<{0}>".into(),
                bare: "Action".into(),
                void: "void".into(),
                separator: ", ".into(),
            },
        )
}

fn library(builder: ProfileBuilder) -> ProfileBuilder {
    const SYSTEM: Option<&str> = Some("System");
    const IO: Option<&str> = Some("System.IO");
    const LINQ: Option<&str> = Some("System.Linq");

    builder
        .type_dependency("List", "System.Collections.Generic")
        .type_dependency("Dictionary", "System.Collections.Generic")
        .type_dependency("Set", "System.Collections.Generic")
        .type_dependency("Tuple", "System")
        .type_dependency("Function", "System")
        .type_dependency("Regexp", "System.Text.RegularExpressions")
        // io
        .std_function("io", "display", &format!("Console.WriteLine({ARGS})"), SYSTEM)
        .std_function("io", "read", "Console.ReadLine()", SYSTEM)
        .std_function("io", "read_file", &format!("File.ReadAllText({ARGS})"), IO)
        .std_function("io", "write_file", &format!("File.WriteAllText({ARGS})"), IO)
        // math
        .std_function("math", "ln", &format!("Math.Log({ARGS})"), SYSTEM)
        .std_function("math", "log", &format!("Math.Log({ARGS})"), SYSTEM)
        .std_function("math", "pow", &format!("Math.Pow({ARGS})"), SYSTEM)
        .std_function("math", "sqrt", &format!("Math.Sqrt({ARGS})"), SYSTEM)
        .std_function("math", "sin", &format!("Math.Sin({ARGS})"), SYSTEM)
        .std_function("math", "cos", &format!("Math.Cos({ARGS})"), SYSTEM)
        .std_function("math", "tan", &format!("Math.Tan({ARGS})"), SYSTEM)
        // system
        .std_function("system", "exit", &format!("Environment.Exit({ARGS})"), SYSTEM)
        // List
        .std_method("List", "length", "%<receiver>.Count", None)
        .std_method("List", "push", &format!("%<receiver>.Add({ARGS})"), None)
        .std_method("List", "insert", &format!("%<receiver>.Insert({ARGS})"), None)
        .std_method("List", "contains", &format!("%<receiver>.Contains({ARGS})"), None)
        .std_method("List", "index", &format!("%<receiver>.IndexOf({ARGS})"), None)
        .std_method("List", "sort", "%<receiver>.Sort()", None)
        .std_method("List", "join", &format!("string.Join({ARGS}, %<receiver>)"), None)
        .std_method("List", "slice_from", &format!("%<receiver>.Skip({ARGS}).ToList()"), LINQ)
        .std_method("List", "slice_to", &format!("%<receiver>.Take({ARGS}).ToList()"), LINQ)
        .std_method("List", "map", &format!("%<receiver>.Select({ARGS}).ToList()"), LINQ)
        .std_method("List", "filter", &format!("%<receiver>.Where({ARGS}).ToList()"), LINQ)
        .std_method("List", "any", &format!("%<receiver>.Any({ARGS})"), LINQ)
        .std_method("List", "all", &format!("%<receiver>.All({ARGS})"), LINQ)
        .std_method("List", "reverse", "Enumerable.Reverse(%<receiver>).ToList()", LINQ)
        // Dictionary
        .std_method("Dictionary", "length", "%<receiver>.Count", None)
        .std_method("Dictionary", "keys", "%<receiver>.Keys", None)
        .std_method("Dictionary", "values", "%<receiver>.Values", None)
        .std_method("Dictionary", "contains", &format!("%<receiver>.ContainsKey({ARGS})"), None)
        // Set
        .std_method("Set", "length", "%<receiver>.Count", None)
        .std_method("Set", "add", &format!("%<receiver>.Add({ARGS})"), None)
        .std_method("Set", "contains", &format!("%<receiver>.Contains({ARGS})"), None)
        // String
        .std_method("String", "length", "%<receiver>.Length", None)
        .std_method("String", "substr", &format!("%<receiver>.Substring({ARGS})"), None)
        .std_method("String", "upper", "%<receiver>.ToUpper()", None)
        .std_method("String", "lower", "%<receiver>.ToLower()", None)
        .std_method("String", "trim", "%<receiver>.Trim()", None)
        .std_method("String", "contains", &format!("%<receiver>.Contains({ARGS})"), None)
        .std_method("String", "find", &format!("%<receiver>.IndexOf({ARGS})"), None)
        .std_method("String", "split", &format!("%<receiver>.Split({ARGS})"), None)
        .std_method("String", "replace", &format!("%<receiver>.Replace({ARGS})"), None)
        .std_method("String", "to_int", "int.Parse(%<receiver>)", None)
        // Numbers
        .std_method("Int", "to_string", "%<receiver>.ToString()", None)
        .std_method("Float", "to_string", "%<receiver>.ToString()", None)
}

// Attribute helpers for overrides.

fn nodes<'n>(node: &'n Node, name: &str) -> Result<&'n [Node], GenerateError> {
    match node.attr(name) {
        Some(Attr::Nodes(nodes)) => Ok(nodes),
        Some(Attr::Absent) => Ok(&[]),
        Some(_) => Err(shape(node, name, "a sequence")),
        None => Err(missing(node, name)),
    }
}

fn child<'n>(node: &'n Node, name: &str) -> Result<&'n Node, GenerateError> {
    match node.attr(name) {
        Some(Attr::Node(child)) => Ok(child),
        Some(Attr::Absent) | None => Err(missing(node, name)),
        Some(_) => Err(shape(node, name, "a node")),
    }
}

fn text<'n>(node: &'n Node, name: &str) -> Result<&'n str, GenerateError> {
    match node.attr(name) {
        Some(Attr::Text(text)) => Ok(text),
        Some(Attr::Absent) | None => Err(missing(node, name)),
        Some(_) => Err(shape(node, name, "text")),
    }
}

fn missing(node: &Node, name: &str) -> GenerateError {
    GenerateError::MissingAttribute {
        tag: node.tag(),
        attribute: name.to_string(),
    }
}

fn shape(node: &Node, name: &str, expected: &'static str) -> GenerateError {
    GenerateError::AttributeShape {
        tag: node.tag(),
        attribute: name.to_string(),
        expected,
    }
}

// Overrides.

/// `int a, string b`
fn params(r: &Renderer<'_>, node: &Node, depth: usize) -> Result<String, GenerateError> {
    let rendered = nodes(node, "params")?
        .iter()
        .map(|param| {
            Ok(format!(
                "{} {}",
                r.render_type(&param.pseudo_type)?,
                r.render(param, depth)?
            ))
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;
    Ok(rendered.join(", "))
}

/// Expression body for a single return, braced block otherwise.
fn anon_block(r: &Renderer<'_>, node: &Node, depth: usize) -> Result<String, GenerateError> {
    let block = nodes(node, "block")?;
    if let Some(value) = single_return(block) {
        return Ok(format!(" {}", r.render(value, depth)?));
    }
    if block.is_empty() {
        return Ok(" { }".to_string());
    }
    let body = r.render_block(block, depth + 1, &JoinMode::Statements)?;
    let indent = r.indent(depth);
    Ok(format!(
        "\n{indent}{{\n{}{body}\n{indent}}}",
        r.indent(depth + 1)
    ))
}

fn base(_r: &Renderer<'_>, node: &Node, _depth: usize) -> Result<String, GenerateError> {
    Ok(format!(" : {}", text(node, "base")?))
}

fn definitions_of(
    r: &Renderer<'_>,
    node: &Node,
    depth: usize,
    tag: Tag,
) -> Result<String, GenerateError> {
    let rendered = nodes(node, "definitions")?
        .iter()
        .filter(|d| d.tag() == tag)
        .map(|d| r.render(d, depth))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(&format!("\n\n{}", r.indent(depth))))
}

fn class_definitions(r: &Renderer<'_>, node: &Node, depth: usize) -> Result<String, GenerateError> {
    definitions_of(r, node, depth, Tag::ClassDefinition)
}

fn function_definitions(
    r: &Renderer<'_>,
    node: &Node,
    depth: usize,
) -> Result<String, GenerateError> {
    definitions_of(r, node, depth, Tag::FunctionDefinition)
}

fn zip_parts(node: &Node) -> Result<(&[Node], &[Node]), GenerateError> {
    let iterators = nodes(child(node, "iterators")?, "iterators")?;
    let sequences = nodes(child(node, "sequences")?, "sequences")?;
    if iterators.len() != sequences.len() || sequences.is_empty() {
        return Err(shape(node, "sequences", "one sequence per iterator"));
    }
    Ok((iterators, sequences))
}

// Synthesized loop variables are named after the loop's first iterator, so
// nested loops, which cannot reuse iterator names, never share one.

/// `_keyItem` for a key/value loop.
fn item_variable(r: &Renderer<'_>, node: &Node, depth: usize) -> Result<String, GenerateError> {
    let key = child(child(node, "iterators")?, "key")?;
    Ok(format!("_{}Item", r.render(key, depth)?))
}

/// `_firstIndex` for a zipped loop.
fn zip_index(r: &Renderer<'_>, node: &Node, depth: usize) -> Result<String, GenerateError> {
    let (iterators, _) = zip_parts(node)?;
    Ok(format!("_{}Index", r.render(&iterators[0], depth)?))
}

fn first_sequence(r: &Renderer<'_>, node: &Node, depth: usize) -> Result<String, GenerateError> {
    let (_, sequences) = zip_parts(node)?;
    r.render(&sequences[0], depth)
}

/// `var a = xs[_aIndex];` for each zipped pair.
fn zip_iterators(r: &Renderer<'_>, node: &Node, depth: usize) -> Result<String, GenerateError> {
    let (iterators, sequences) = zip_parts(node)?;
    let index = Node::local(zip_index(r, node, depth)?, "Int");
    let lines = iterators
        .iter()
        .zip(sequences)
        .map(|(iterator, sequence)| {
            let element = Node::index(
                sequence.clone(),
                index.clone(),
                iterator.pseudo_type.clone(),
            );
            Ok(format!(
                "var {} = {};",
                r.render(iterator, depth)?,
                r.render(&element, depth)?
            ))
        })
        .collect::<Result<Vec<_>, GenerateError>>()?;
    Ok(lines.join(&format!("\n{}", r.indent(depth))))
}

fn string_literal(_r: &Renderer<'_>, node: &Node, _depth: usize) -> Result<String, GenerateError> {
    let value = text(node, "value")?;
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
    Ok(out)
}

fn verbatim_string(_r: &Renderer<'_>, node: &Node, _depth: usize) -> Result<String, GenerateError> {
    Ok(format!("@\"{}\"", text(node, "value")?.replace('"', "\"\"")))
}

fn standard_call(r: &Renderer<'_>, node: &Node, depth: usize) -> Result<String, GenerateError> {
    let namespace = text(node, "namespace")?;
    let function = text(node, "function")?;
    let entry = r
        .profile()
        .library()
        .function(namespace, function)
        .ok_or_else(|| GenerateError::UnsupportedStandardCall(format!("{namespace}.{function}")))?;
    r.render_template(&entry.template, node, depth)
}

fn standard_method_call(
    r: &Renderer<'_>,
    node: &Node,
    depth: usize,
) -> Result<String, GenerateError> {
    let receiver = child(node, "receiver")?.pseudo_type.base_name();
    let message = text(node, "message")?;
    let entry = r
        .profile()
        .library()
        .method(receiver, message)
        .ok_or_else(|| GenerateError::UnsupportedStandardCall(format!("{receiver}.{message}")))?;
    r.render_template(&entry.template, node, depth)
}

/// Binding strength of a C# binary operator; higher binds tighter.
fn precedence(op: &str) -> u8 {
    match op {
        "||" => 1,
        "&&" => 2,
        "|" => 3,
        "^" => 4,
        "&" => 5,
        "==" | "!=" => 6,
        "<" | ">" | "<=" | ">=" => 7,
        "<<" | ">>" => 8,
        "+" | "-" => 9,
        "*" | "/" | "%" => 10,
        _ => 11,
    }
}

fn binary_op(node: &Node) -> Option<&str> {
    match &node.kind {
        Kind::BinaryOp { op, .. } | Kind::Comparison { op, .. } => Some(op.as_str()),
        _ => None,
    }
}

/// Render an operand, parenthesized when it binds looser than its parent.
/// Right operands of equal precedence are parenthesized too, so the tree's
/// grouping survives for non-associative operators.
fn operand(
    r: &Renderer<'_>,
    node: &Node,
    depth: usize,
    side: &str,
) -> Result<String, GenerateError> {
    let value = child(node, side)?;
    let rendered = r.render(value, depth)?;
    let wrap = match (binary_op(node), binary_op(value)) {
        (Some(outer), Some(inner)) => {
            let (outer, inner) = (precedence(outer), precedence(inner));
            inner < outer || (inner == outer && side == "right")
        }
        _ => false,
    };
    Ok(if wrap { format!("({rendered})") } else { rendered })
}

fn left_operand(r: &Renderer<'_>, node: &Node, depth: usize) -> Result<String, GenerateError> {
    operand(r, node, depth, "left")
}

fn right_operand(r: &Renderer<'_>, node: &Node, depth: usize) -> Result<String, GenerateError> {
    operand(r, node, depth, "right")
}

/// Binary operands are grouped. So is a nested unary operator that would
/// fuse with this one (`- -x` must not become `--x`).
fn unary_operand(r: &Renderer<'_>, node: &Node, depth: usize) -> Result<String, GenerateError> {
    let value = child(node, "value")?;
    let rendered = r.render(value, depth)?;
    let fuses = match (&node.kind, &value.kind) {
        (Kind::UnaryOp { op: outer, .. }, Kind::UnaryOp { op: inner, .. }) => {
            match (outer.chars().last(), inner.chars().next()) {
                (Some(a), Some(b)) => a == b && matches!(a, '+' | '-'),
                _ => false,
            }
        }
        _ => false,
    };
    Ok(if fuses || binary_op(value).is_some() {
        format!("({rendered})")
    } else {
        rendered
    })
}
