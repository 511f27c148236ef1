//! Snapshot tests for whole rendered programs.
//!
//! Run `cargo insta review` to update snapshots after intentional changes.

use jsrope::{
    Ajax, BeautifyOptions, Bool, Element, Error, Flow, For, Function, If, Int, Literal, Object,
    Params, Render, Return, Switch, Util, Value, let_binding, negative,
};

// ============================================================================
// Programs
// ============================================================================

mod prime_checker {
    use super::*;

    fn is_prime() -> Function {
        let number = Int::new("num");
        let i = Int::new("i");
        let body = Flow::new()
            .then(For::new(
                let_binding(&i, 2),
                i.less_than(number.pow(0.5).to_int().add(1)),
                i.add_assign(1),
                Flow::new().then(If::new(
                    negative(&number.modulo(&i)),
                    Flow::new().then(Return::new(Bool::literal(false))),
                )),
            ))
            .then(Return::new(Bool::literal(true)));
        Function::new("is_prime", Params::new().required("num"), body).unwrap()
    }

    fn keyup_handler() -> impl Render {
        let input_box = Element::by_id("name_input");
        let p = Element::by_tag("p");
        let check = is_prime()
            .call()
            .arg(input_box.get_value().to_int())
            .finish()
            .unwrap();
        let request = Ajax::new(
            "/",
            [
                ("method", Literal::from("GET")),
                ("data", Literal::mapping([("data", input_box.get_value())])),
            ],
            false,
        )
        .unwrap()
        .done(Util::alert(input_box.get_value()));
        let report = Switch::new()
            .case(check, p.change_inner_html("prime"))
            .otherwise(p.change_inner_html("not prime"));
        input_box.on("keyup", Flow::new().then(request).then(report))
    }

    #[test]
    fn function_definition() {
        insta::assert_snapshot!(is_prime().to_code(), @"function is_prime(num) {for(let i = 2;(i < parseInt(num ** 0.5) + 1);i += 1){if (!(num % i)){return false}};return true}");
    }

    #[test]
    fn function_definition_pretty() {
        insta::assert_snapshot!(is_prime().prettify(), @r"
        function is_prime(num) {
            for(let i = 2;(i < parseInt(num ** 0.5) + 1);i += 1){
                if (!(num % i)){
                    return false
                }
            };
            return true
        }
        ");
    }

    #[test]
    fn event_handler() {
        insta::assert_snapshot!(keyup_handler().to_code(), @r#"$('#name_input').on('keyup',function(e){$.ajax({url: "/", method: "GET", data: {"data": $('#name_input').val()}}).done(alert($('#name_input').val()));if (is_prime(parseInt($('#name_input').val()))){$('p').html('prime')}else {$('p').html('not prime')}})"#);
    }

    #[test]
    fn event_handler_pretty() {
        insta::assert_snapshot!(keyup_handler().prettify(), @r#"
        $('#name_input').on('keyup',function(e){
            $.ajax({
                url: "/", method: "GET", data: {
                    "data": $('#name_input').val()
                }
            }).done(alert($('#name_input').val()));
            if (is_prime(parseInt($('#name_input').val()))){
                $('p').html('prime')
            } else {
                $('p').html('not prime')
            }
        })
        "#);
    }
}

mod configuration {
    use super::*;

    #[test]
    fn default_options() {
        insta::assert_json_snapshot!(BeautifyOptions::default(), @r#"
        {
          "indent_size": 4,
          "indent_char": " ",
          "end_with_newline": false
        }
        "#);
    }
}

// ============================================================================
// Rendering properties
// ============================================================================

mod properties {
    use super::*;

    #[test]
    fn binary_operators_concatenate() {
        let a = Int::new("a");
        let b = Int::new("b");
        let cases = [
            (a.add(&b), "+"),
            (a.subtract(&b), "-"),
            (a.multiply(&b), "*"),
            (a.divide(&b), "/"),
            (a.modulo(&b), "%"),
            (a.pow(&b), "**"),
        ];
        for (value, op) in cases {
            assert_eq!(value.to_code().as_str(), format!("a {} b", op));
        }
    }

    #[test]
    fn equality_differs_only_by_operator() {
        let a = Object::new("a");
        let strict: Bool = a.strict_eq(Object::new("b"));
        let loose: Bool = a.loose_eq(Object::new("b"));
        assert_eq!(strict.to_code().as_str(), "(a === b)");
        assert_eq!(loose.to_code().as_str(), "(a == b)");
    }

    #[test]
    fn bool_negation_wraps() {
        for text in ["x", "(x)", "true", "f(x)", "a && b"] {
            let negated = Bool::new(text).negate().to_code();
            assert!(negated.as_str().starts_with("!("), "{}", negated);
            assert!(negated.as_str().ends_with(')'), "{}", negated);
        }
    }

    #[test]
    fn else_branch_renders_last() {
        let switch = Switch::new().case("c1", "a1").otherwise("a3").case("c2", "a2");
        insta::assert_snapshot!(switch.to_code(), @"if (c1){a1}else if (c2){a2}else {a3}");
    }

    #[test]
    fn function_binding() {
        let f = Function::new(
            "f",
            Params::new().required("a").with_default("b", "1"),
            "return a + b",
        )
        .unwrap();
        assert_eq!(f.call().arg(5).finish().unwrap().to_code().as_str(), "f(5, 1)");
        assert_eq!(
            f.call().arg(5).kwarg("b", 9).finish().unwrap().to_code().as_str(),
            "f(5, 9)"
        );
        assert_eq!(
            f.call().arg(5).kwarg("a", 9).finish().unwrap_err(),
            Error::DuplicateBinding("a".to_string())
        );
    }

    #[test]
    fn element_value_change() {
        insta::assert_snapshot!(Element::by_id("x").change_value("hi").to_code(), @"$('#x').val('hi')");
    }

    #[test]
    fn ajax_strictness() {
        let settings = || [("bogus", Literal::from(1)), ("cache", Literal::from(true))];
        assert!(matches!(
            Ajax::new("/", settings(), false),
            Err(Error::InvalidArgument(_))
        ));
        let lenient = Ajax::new("/", settings(), true).unwrap();
        insta::assert_snapshot!(lenient.to_code(), @r#"$.ajax({url: "/", cache: true})"#);
    }

    #[test]
    fn rendering_is_idempotent() {
        let handler = Element::by_id("b").on("click", Flow::new().then(Util::alert("hi")));
        assert_eq!(handler.to_code(), handler.to_code());
        assert_eq!(handler.prettify(), handler.prettify());
    }

    #[test]
    fn literals_round_trip_through_json() {
        let value = Literal::mapping([
            ("n", Literal::from(3)),
            ("f", Literal::from(2.5)),
            ("s", Literal::from("say \"hi\"")),
            ("ok", Literal::from(false)),
            ("list", Literal::from(vec![1, 2, 3])),
            ("nested", Literal::mapping([("k", Literal::Null)])),
        ]);
        let parsed: serde_json::Value = serde_json::from_str(&value.to_source()).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({
                "n": 3,
                "f": 2.5,
                "s": "say \"hi\"",
                "ok": false,
                "list": [1, 2, 3],
                "nested": {"k": null}
            })
        );
    }
}
