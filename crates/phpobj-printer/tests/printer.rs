use phpobj_parser::parse;
use phpobj_printer::{print_program, print_stmt, PrinterConfig};

fn print(source: &str) -> String {
    print_with(source, &PrinterConfig::default())
}

fn print_with(source: &str, config: &PrinterConfig) -> String {
    let program = parse(source).unwrap_or_else(|err| panic!("parse failed: {err}\n{source}"));
    print_program(&program, config).unwrap()
}

// =============================================================================
// Control flow
// =============================================================================

#[test]
fn test_if_else() {
    assert_eq!(
        print("<?php if ($a > 1) { echo $a; } else { return; }"),
        "if (<expression>) {\n    echo <expression>;\n} else {\n    return;\n}\n"
    );
}

#[test]
fn test_elseif_prints_as_nested_else() {
    insta::assert_snapshot!(print("<?php if ($a) { f(); } elseif ($b) { g(); } else { h(); }").trim_end(), @r"
if (<expression>) {
    <expression>;
} else {
    if (<expression>) {
        <expression>;
    } else {
        <expression>;
    }
}
");
}

#[test]
fn test_unbraced_branch_is_indented() {
    assert_eq!(print("<?php if ($a) return 1;"), "if (<expression>) {\n    return <expression>;\n}\n");
}

#[test]
fn test_try_catch_finally() {
    assert_eq!(
        print("<?php try { f(); } catch (A | B $e) { echo 1; } catch (C) {} finally { g(); }"),
        "try {\n    <expression>;\n} catch (A | B $e) {\n    echo <expression>;\n} catch (C) {\n} finally {\n    <expression>;\n}\n"
    );
}

#[test]
fn test_inline_html_and_nop_print_nothing() {
    assert_eq!(print("<?php ;; echo 1; ?>\n<b>html</b>\n"), "echo <expression>;\n");
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn test_class_members_are_grouped() {
    insta::assert_snapshot!(print(
        "<?php abstract class A extends B implements C, D {
            public function run($x, $y = 2) { return $x; }
            const LIMIT = 10;
            protected static $count = 0;
            abstract protected function step();
            var $plain;
            final public static function make(): self { return new static; }
        }"
    ).trim_end(), @r"
abstract class A extends B implements C, D {
    const LIMIT = <expression>;
    protected static $count = <expression>;
    public $plain;
    public function run($x, $y = <expression>) {
        return <expression>;
    }
    abstract protected function step();
    final public static function make(): self {
        return <expression>;
    }
}
");
}

#[test]
fn test_interface() {
    assert_eq!(
        print("<?php interface I extends J, K { function a(array &$xs, ...$rest); public static function b(): ?int; }"),
        "interface I extends J, K {\n    public function a(array &$xs, ...$rest);\n    public static function b(): ?int;\n}\n"
    );
}

#[test]
fn test_function_declaration() {
    assert_eq!(
        print("<?php function &f(int $a) { if ($a) { return $a; } }"),
        "function &f(int $a) {\n    if (<expression>) {\n        return <expression>;\n    }\n}\n"
    );
}

#[test]
fn test_final_class_with_constant_without_value() {
    assert_eq!(print("<?php final class A { const B; }"), "final class A {\n    const B;\n}\n");
}

// =============================================================================
// Configuration and stability
// =============================================================================

#[test]
fn test_indent_unit_is_configurable() {
    let config = PrinterConfig::from_json(r#"{"indent_unit": "\t"}"#).unwrap();
    assert_eq!(
        print_with("<?php while (true) { if ($a) { echo 1; } }", &config),
        "while (<expression>) {\n\tif (<expression>) {\n\t\techo <expression>;\n\t}\n}\n"
    );
}

#[test]
fn test_whitespace_and_expressions_are_normalized() {
    let compact = print("<?php class A{public $x=1;function f(){if($this->x){return $this->x+1;}}}");
    let spread = print(
        "<?php
        class   A
        {
            public $x = [1, 2, 3];

            function f()
            {
                if (strlen($this->x) > 0)
                {
                    return $this->x->count();
                }
            }
        }",
    );
    assert_eq!(compact, spread);
}

#[test]
fn test_printing_is_deterministic() {
    let source = include_str!("../../phpobj-parser/tests/fixtures/abstract_classes.php");
    let program = parse(source).unwrap();
    let config = PrinterConfig::default();
    let first = print_program(&program, &config).unwrap();
    let second = print_program(&program, &config).unwrap();
    assert_eq!(first, second);
    assert!(first.starts_with("abstract class Shape implements Drawable {\n"));
}

#[test]
fn test_print_stmt_single_statement() {
    let program = parse("<?php echo 1; return;").unwrap();
    let config = PrinterConfig::default();
    assert_eq!(print_stmt(&program.stmts[1], &config).unwrap(), "return;\n");
}
