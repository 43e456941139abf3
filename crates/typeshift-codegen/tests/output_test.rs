//! Reference output of the full pipeline for single-module type sets

use pretty_assertions::assert_eq;
use typeshift_codegen::{CodegenError, Generator, GeneratorConfig, OutputKind, RenderedModule};
use typeshift_core::introspect::{SourcePrimitive, TypeHandle};
use typeshift_core::CoreError;
use typeshift_test_fixtures::TypeUniverse;

const NS: &str = "App.Tests.TestData.SimpleClasses";

fn render_single(universe: &TypeUniverse, roots: &[TypeHandle]) -> RenderedModule {
    let generator = Generator::new(universe, GeneratorConfig::new("TestRoot"));
    let mut modules = generator.generate(roots).unwrap();
    assert_eq!(modules.len(), 1);
    modules.remove(0)
}

#[test]
fn all_supported_primitives_render_through_the_fixed_table() {
    let mut universe = TypeUniverse::new();
    let class = universe.class(NS, "ClassWithAllSupportedTypes");
    for (name, kind) in [
        ("Abool", SourcePrimitive::Bool),
        ("Astring", SourcePrimitive::Text),
        ("ADatetime", SourcePrimitive::DateTime),
        ("ADatetimeOffset", SourcePrimitive::DateTimeOffset),
        ("Along", SourcePrimitive::Long),
        ("Aint", SourcePrimitive::Int),
        ("Adecimal", SourcePrimitive::Decimal),
        ("Adouble", SourcePrimitive::Double),
    ] {
        let primitive = universe.primitive(kind);
        universe.property(class, name, primitive);
    }

    let rendered = render_single(&universe, &[class]);
    assert_eq!(
        rendered.text,
        "export interface ClassWithAllSupportedTypes {\n\
         \tAbool: boolean;\n\
         \tAstring: string;\n\
         \tADatetime: Date;\n\
         \tADatetimeOffset: Date;\n\
         \tAlong: number;\n\
         \tAint: number;\n\
         \tAdecimal: number;\n\
         \tAdouble: number;\n\
         }\n"
    );
    assert_eq!(rendered.kind, OutputKind::DeclarationOnly);
}

#[test]
fn inherited_members_stay_on_the_base_declaration() {
    let mut universe = TypeUniverse::new();
    let string = universe.primitive(SourcePrimitive::Text);
    let base = universe.class(NS, "TestClassBase");
    universe.property(base, "NameInBase", string);
    let child = universe.class(NS, "TestClassChild");
    universe.set_base(child, base);
    universe.property(child, "TestNameChild", string);

    let rendered = render_single(&universe, &[child]);
    assert_eq!(
        rendered.text,
        "export interface TestClassChild extends TestClassBase {\n\
         \tTestNameChild: string;\n\
         }\n\
         export interface TestClassBase {\n\
         \tNameInBase: string;\n\
         }\n"
    );
}

#[test]
fn generic_base_reuses_the_declarations_own_parameter() {
    let mut universe = TypeUniverse::new();
    let container = universe.generic_class(NS, "Container", &["T"]);
    let t_container = universe.param(container, "T");
    universe.property(container, "value", t_container);

    let wrapper = universe.generic_class(NS, "Wrapper", &["T"]);
    let t_wrapper = universe.param(wrapper, "T");
    let list = universe.list_of(t_wrapper);
    let base = universe.instantiate(container, &[list]);
    universe.set_base(wrapper, base);

    let rendered = render_single(&universe, &[wrapper]);
    assert_eq!(
        rendered.text,
        "export interface Wrapper<T> extends Container<T[]> {\n\
         }\n\
         export interface Container<T> {\n\
         \tvalue: T;\n\
         }\n"
    );
}

#[test]
fn enum_values_render_verbatim() {
    let mut universe = TypeUniverse::new();
    let simple = universe.enumeration(NS, "SimpleEnum", &[("One", 3), ("Two", 5)]);

    let rendered = render_single(&universe, &[simple]);
    assert_eq!(
        rendered.text,
        "export enum SimpleEnum {\n\tOne = 3,\n\tTwo = 5\n}\n"
    );
    assert_eq!(rendered.kind, OutputKind::DeclarationOnly);
}

#[test]
fn every_collection_shape_renders_as_an_array() {
    let mut universe = TypeUniverse::new();
    let string = universe.primitive(SourcePrimitive::Text);
    let array = universe.array_of(string);
    let list = universe.list_of(string);
    let enumerable = universe.sequence_of("Enumerable", string);
    let hash_set = universe.sequence_of("HashSet", string);
    let custom = universe.sequence_of("CustomStringCollection", string);

    let class = universe.class(NS, "ArrayClass");
    universe.property(class, "StringArray", array);
    universe.property(class, "StringList", list);
    universe.property(class, "StringEnumerable", enumerable);
    universe.property(class, "StringHashSet", hash_set);
    universe.property(class, "StringCustom", custom);

    let rendered = render_single(&universe, &[class]);
    assert_eq!(
        rendered.text,
        "export interface ArrayClass {\n\
         \tStringArray: string[];\n\
         \tStringList: string[];\n\
         \tStringEnumerable: string[];\n\
         \tStringHashSet: string[];\n\
         \tStringCustom: string[];\n\
         }\n"
    );
}

#[test]
fn generic_sequences_of_parameters_render_as_arrays() {
    let mut universe = TypeUniverse::new();
    let class = universe.generic_class(NS, "GenericClassWithGenericArrayProperties", &["T"]);
    let t = universe.param(class, "T");
    let array = universe.array_of(t);
    let list = universe.list_of(t);
    universe.property(class, "GenericArray", array);
    universe.property(class, "GenericList", list);

    let rendered = render_single(&universe, &[class]);
    assert_eq!(
        rendered.text,
        "export interface GenericClassWithGenericArrayProperties<T> {\n\
         \tGenericArray: T[];\n\
         \tGenericList: T[];\n\
         }\n"
    );
}

#[test]
fn generic_properties_expand_their_arguments() {
    let mut universe = TypeUniverse::new();
    let int = universe.primitive(SourcePrimitive::Int);
    let string = universe.primitive(SourcePrimitive::Text);
    let generic = universe.generic_class(NS, "BasicGeneric", &["T1", "T2"]);
    let t1 = universe.param(generic, "T1");
    let t2 = universe.param(generic, "T2");
    universe.property(generic, "TestProp1", t1);
    universe.property(generic, "TestProp2", t2);
    let closed = universe.instantiate(generic, &[int, string]);
    let class = universe.class(NS, "ClassWithGenericProperty");
    universe.property(class, "GenericProperty", closed);

    let rendered = render_single(&universe, &[class]);
    assert_eq!(
        rendered.text,
        "export interface ClassWithGenericProperty {\n\
         \tGenericProperty: BasicGeneric<number, string>;\n\
         }\n\
         export interface BasicGeneric<T1, T2> {\n\
         \tTestProp1: T1;\n\
         \tTestProp2: T2;\n\
         }\n"
    );
}

#[test]
fn nested_instantiations_render_recursively() {
    let mut universe = TypeUniverse::new();
    let int = universe.primitive(SourcePrimitive::Int);
    let string = universe.primitive(SourcePrimitive::Text);
    let generic = universe.generic_class(NS, "BasicGeneric", &["T1", "T2"]);
    let t1 = universe.param(generic, "T1");
    let t2 = universe.param(generic, "T2");
    universe.property(generic, "TestProp1", t1);
    universe.property(generic, "TestProp2", t2);
    let inner = universe.instantiate(generic, &[string, int]);
    let outer = universe.instantiate(generic, &[inner, string]);
    let class = universe.class(NS, "ClassWithGenericBaseClassInSeveralLevels");
    universe.set_base(class, outer);

    let rendered = render_single(&universe, &[class]);
    assert_eq!(
        rendered.text,
        "export interface ClassWithGenericBaseClassInSeveralLevels extends \
         BasicGeneric<BasicGeneric<string, number>, string> {\n\
         }\n\
         export interface BasicGeneric<T1, T2> {\n\
         \tTestProp1: T1;\n\
         \tTestProp2: T2;\n\
         }\n"
    );
}

#[test]
fn collection_bases_disappear_from_the_output() {
    let mut universe = TypeUniverse::new();
    let string = universe.primitive(SourcePrimitive::Text);
    let strings = universe.sequence_of("StringCollection", string);
    let custom = universe.class(NS, "CustomStringCollection");
    universe.set_base(custom, strings);

    let rendered = render_single(&universe, &[custom]);
    assert_eq!(
        rendered.text,
        "export interface CustomStringCollection {\n}\n"
    );
}

#[test]
fn classes_render_with_access_modifiers() {
    let mut universe = TypeUniverse::new();
    let string = universe.primitive(SourcePrimitive::Text);
    let base = universe.class(NS, "TestClassBase");
    universe.property(base, "NameInBase", string);
    let child = universe.class(NS, "TestClassChild");
    universe.set_base(child, base);
    universe.property(child, "TestNameChild", string);

    let generator = Generator::new(
        &universe,
        GeneratorConfig::new("TestRoot").with_interface_default(false),
    );
    let modules = generator.generate(&[child]).unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(
        modules[0].text,
        "export class TestClassChild extends TestClassBase {\n\
         \tpublic TestNameChild: string;\n\
         }\n\
         export class TestClassBase {\n\
         \tpublic NameInBase: string;\n\
         }\n"
    );
    assert_eq!(modules[0].kind, OutputKind::Structural);
    assert_eq!(
        modules[0].file_path("out"),
        "out/App/Tests/TestData/SimpleClasses.ts"
    );
}

fn reference_universe() -> (TypeUniverse, Vec<TypeHandle>) {
    let mut universe = TypeUniverse::new();
    let string = universe.primitive(SourcePrimitive::Text);
    let int = universe.primitive(SourcePrimitive::Int);

    let status = universe.enumeration("App.Shared", "Status", &[("Active", 1), ("Closed", 4)]);
    let address = universe.class("App.Geo", "Address");
    universe.property(address, "Street", string);

    let container = universe.generic_class("App.Generic", "Container", &["T"]);
    let t = universe.param(container, "T");
    universe.property(container, "value", t);

    let addresses = universe.instantiate(container, &[address]);
    let person = universe.class("App.Main", "Person");
    universe.property(person, "Name", string);
    universe.property(person, "Age", int);
    universe.property(person, "Status", status);
    universe.property(person, "Addresses", addresses);

    (universe, vec![person])
}

#[test]
fn generation_is_deterministic() {
    let (universe, roots) = reference_universe();
    let first: Vec<String> = Generator::new(&universe, GeneratorConfig::new("Root"))
        .generate(&roots)
        .unwrap()
        .into_iter()
        .map(|module| module.text)
        .collect();
    let second: Vec<String> = Generator::new(&universe, GeneratorConfig::new("Root"))
        .generate(&roots)
        .unwrap()
        .into_iter()
        .map(|module| module.text)
        .collect();
    assert_eq!(first, second);

    // A freshly built but identical universe also produces identical text.
    let (rebuilt, roots) = reference_universe();
    let third: Vec<String> = Generator::new(&rebuilt, GeneratorConfig::new("Root"))
        .generate(&roots)
        .unwrap()
        .into_iter()
        .map(|module| module.text)
        .collect();
    assert_eq!(first, third);
}

#[test]
fn every_rendered_reference_is_also_declared() {
    let (universe, roots) = reference_universe();
    let modules = Generator::new(&universe, GeneratorConfig::new("Root"))
        .generate(&roots)
        .unwrap();

    let declared: Vec<String> = modules
        .iter()
        .flat_map(|module| {
            module.text.lines().filter_map(|line| {
                line.strip_prefix("export ").map(|rest| {
                    rest.split_whitespace()
                        .nth(1)
                        .unwrap_or_default()
                        .trim_end_matches('{')
                        .split('<')
                        .next()
                        .unwrap_or_default()
                        .to_string()
                })
            })
        })
        .collect();

    for name in ["Person", "Address", "Container", "Status"] {
        assert!(declared.iter().any(|declared| declared == name));
    }
}

#[test]
fn missing_logical_location_fails_the_request() {
    let mut universe = TypeUniverse::new();
    let orphan = universe.class_without_location("Orphan");

    let err = Generator::new(&universe, GeneratorConfig::new("Root"))
        .generate(&[orphan])
        .unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Core(CoreError::Configuration { handle, .. }) if handle == orphan
    ));
}
