//! End-to-end data-flow scenarios over realistic state documents.

use serde_json::{Value, json};
use statelang_dataflow::{DataFlow, ErrorKind, set_at_pointer};
use statelang_path::{JsonPathEvaluator, PathEvaluator, Pointer};

const ROOT_INPUT: &str = r#"{
  "root" : {
    "array" : [ {
      "name" : "John",
      "age" : 17
    }, null, null, null, 12 ],
    "object" : {
      "num" : 81,
      "str" : "text"
    }
  },
  "descr" : "description"
}
"#;

const GREETING_INPUT: &str = r#"{
  "a": 1,
  "numbers": 1,
  "b": {
    "greeting": "Hi!"
  }
}"#;

const GREETING_LIST_INPUT: &str = r#"{
  "a": 1,
  "numbers": 1,
  "b": {
    "greeting": [1,2,3,4]
  }
}"#;

const NESTED_INPUT: &str = r#"{
  "a": 1,
  "numbers": 1,
  "b": {
    "greeting": {"c": {"x": [6,7]}}
  }
}"#;

const PRODUCT_INPUT: &str = r#"{
  "comment": "Example for Parameters.",
  "product": {
    "details": {
       "color": "blue",
       "size": "small",
       "material": "cotton"
    },
    "availability": "in stock",
    "sku": "2317",
    "arr": [1,2,3,4],
    "cost": "$23"
  }
}"#;

const PRODUCT_PARAMETERS: &str = r#"{
   "comment": "Selecting what I care about.",
   "MyDetails": {
       "size.$": "$.product.details.size",
       "details.$": "$.product.details",
       "exists.$": "$.product.availability",
       "array.$": "$.product.arr",
       "StaticValue": {
         "price.$": "$.product.cost"
       }
   }
}"#;

fn parse(text: &str) -> Value {
  serde_json::from_str(text).expect("result must be valid JSON")
}

#[test]
fn test_empty_input_path_yields_empty_object() {
  let flow = DataFlow::new();
  let result = flow.effective_input(ROOT_INPUT, "", PRODUCT_PARAMETERS).unwrap();
  assert_eq!(result, "{}");
}

#[test]
fn test_product_parameters() {
  let flow = DataFlow::new();
  let result = flow
    .effective_input(PRODUCT_INPUT, "$", PRODUCT_PARAMETERS)
    .unwrap();

  assert_eq!(
    parse(&result),
    json!({
      "comment": "Selecting what I care about.",
      "MyDetails": {
        "size": "small",
        "details": { "color": "blue", "size": "small", "material": "cotton" },
        "exists": "in stock",
        "array": [1, 2, 3, 4],
        "StaticValue": { "price": "$23" }
      }
    })
  );

  // Key order follows the template, each resolved key in its source's place.
  assert_eq!(
    result,
    concat!(
      r#"{"comment":"Selecting what I care about.","#,
      r#""MyDetails":{"size":"small","#,
      r#""details":{"color":"blue","size":"small","material":"cotton"},"#,
      r#""exists":"in stock","array":[1,2,3,4],"StaticValue":{"price":"$23"}}}"#
    )
  );
}

#[test]
fn test_input_path_without_parameters() {
  let flow = DataFlow::new();
  let result = flow.effective_input(GREETING_INPUT, "$.b.greeting", "").unwrap();
  assert_eq!(result, r#""Hi!""#);
}

#[test]
fn test_parameters_against_missing_input_path() {
  // The missing leaf reads as null, and the template paths cannot be followed
  // through a null document.
  let flow = DataFlow::new();
  let err = flow
    .effective_input(ROOT_INPUT, "$.root.abc", PRODUCT_PARAMETERS)
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::InvalidPath);
}

#[test]
fn test_missing_input_path_is_invalid() {
  let flow = DataFlow::new();
  let err = flow
    .effective_input(ROOT_INPUT, "$.root.abc.def", "")
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::InvalidPath);
}

#[test]
fn test_missing_parameter_path_is_invalid() {
  let flow = DataFlow::new();
  let err = flow
    .effective_input(
      PRODUCT_INPUT,
      "$",
      r#"{ "outer": { "weight.$": "$.product.shipping.weight" } }"#,
    )
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::InvalidPath);
}

#[test]
fn test_invalid_parameter_json_is_generic() {
  let flow = DataFlow::new();
  let err = flow
    .effective_input(ROOT_INPUT, "$.root.abc", &PRODUCT_PARAMETERS[2..])
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Generic);
}

#[test]
fn test_invalid_input_json_is_generic() {
  let flow = DataFlow::new();
  let err = flow
    .effective_input(&ROOT_INPUT[1..], "$.root.abc", PRODUCT_PARAMETERS)
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Generic);
}

#[test]
fn test_empty_output_path_yields_empty_object() {
  let flow = DataFlow::new();
  let result = flow
    .effective_output(ROOT_INPUT, GREETING_INPUT, "$", "")
    .unwrap();
  assert_eq!(result, "{}");
}

#[test]
fn test_root_output_path_is_identity() {
  let flow = DataFlow::new();
  for result_path in ["", "$", "$.root.array", "$.descr.text"] {
    let result = flow
      .effective_output(ROOT_INPUT, GREETING_INPUT, result_path, "$")
      .unwrap();
    assert_eq!(result, ROOT_INPUT);
  }
}

#[test]
fn test_empty_result_path_discards_result() {
  let flow = DataFlow::new();
  let result = flow
    .effective_output(GREETING_LIST_INPUT, GREETING_INPUT, "", "$.b.greeting")
    .unwrap();
  assert_eq!(result, "[1,2,3,4]");
}

#[test]
fn test_empty_state_result_discards_result() {
  let flow = DataFlow::new();
  let result = flow
    .effective_output(GREETING_LIST_INPUT, "", "$.x", "$.b.greeting")
    .unwrap();
  assert_eq!(result, "[1,2,3,4]");
}

#[test]
fn test_root_result_path_replaces_input() {
  let flow = DataFlow::new();
  let result = flow
    .effective_output(ROOT_INPUT, NESTED_INPUT, "$", "$.b.greeting")
    .unwrap();
  assert_eq!(result, r#"{"c":{"x":[6,7]}}"#);
}

#[test]
fn test_result_path_overwrites_existing_node() {
  let flow = DataFlow::new();
  let result = flow
    .effective_output(ROOT_INPUT, GREETING_INPUT, "$.root.array", "$.root.array.a")
    .unwrap();
  assert_eq!(result, "1");
}

#[test]
fn test_result_path_creates_missing_nodes() {
  let flow = DataFlow::new();
  let result = flow
    .effective_output(
      ROOT_INPUT,
      GREETING_INPUT,
      "$.root.test.next",
      "$.root.test.next.a",
    )
    .unwrap();
  assert_eq!(result, "1");
}

#[test]
fn test_missing_output_leaf_reads_as_null() {
  let flow = DataFlow::new();
  let result = flow
    .effective_output(ROOT_INPUT, GREETING_INPUT, "$.root.test.next", "$.root.abc")
    .unwrap();
  assert_eq!(result, "null");
}

#[test]
fn test_missing_leaf_reads_as_null_in_any_notation() {
  let flow = DataFlow::new();
  for path in ["$.root.abc", "$['root']['abc']", "$.root['abc']"] {
    assert_eq!(flow.effective_input(ROOT_INPUT, path, "").unwrap(), "null", "path {path}");
  }

  let err = flow
    .effective_input(ROOT_INPUT, "$['root']['abc']['def']", "")
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::InvalidPath);
}

#[test]
fn test_result_path_with_huge_index_is_an_error() {
  let flow = DataFlow::new();
  let err = flow
    .effective_output(r#"{"a":[]}"#, "1", "$.a.1000000000000000000", "$.x")
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Generic);
}

#[test]
fn test_missing_output_path_is_invalid() {
  let flow = DataFlow::new();
  let err = flow
    .effective_output(
      ROOT_INPUT,
      GREETING_INPUT,
      "$.root.test.next",
      "$.root.abc.def",
    )
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::InvalidPath);
}

#[test]
fn test_merge_into_scalar_names_field_and_type() {
  let flow = DataFlow::new();
  let err = flow
    .effective_output(ROOT_INPUT, GREETING_INPUT, "$.descr.text", "$.descr")
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Generic);
  let message = err.to_string();
  assert!(message.contains("`text`"), "{message}");
  assert!(message.contains("STRING"), "{message}");
}

#[test]
fn test_result_path_round_trip() {
  let flow = DataFlow::new();
  let results = [GREETING_INPUT, NESTED_INPUT, "[1, 2]", "\"plain\"", "42", "null"];
  let paths = ["$.out", "$.root.object.num", "$.root.array.7", "$.fresh.3.deep"];

  for result in results {
    for path in paths {
      let output = flow.effective_output(ROOT_INPUT, result, path, path).unwrap();
      assert_eq!(parse(&output), parse(result), "result {result} at {path}");
    }
  }
}

#[test]
fn test_array_auto_expand() {
  let evaluator = JsonPathEvaluator::default();
  let mut doc = json!({ "list": ["a", "b"] });
  set_at_pointer(&mut doc, &Pointer::from_path("$.list.6").unwrap(), json!("g")).unwrap();

  let list = evaluator.evaluate(&doc, "$.list").unwrap().remove(0);
  let list = list.as_array().unwrap();
  assert_eq!(list.len(), 7);
  assert!(list[2..6].iter().all(Value::is_null));
  assert_eq!(list[6], json!("g"));
}

#[test]
fn test_merged_document_is_pretty() {
  let flow = DataFlow::new();
  let merged = flow
    .merge_result(r#"{"a":[1]}"#, r#"{"ok":true}"#, "$.a.2")
    .unwrap();
  assert_eq!(
    merged,
    "{\n  \"a\": [\n    1,\n    null,\n    {\n      \"ok\": true\n    }\n  ]\n}"
  );
}

#[test]
fn test_shared_across_threads() {
  let flow = DataFlow::new();

  std::thread::scope(|scope| {
    let handles: Vec<_> = (0..8)
      .map(|i| {
        let flow = &flow;
        scope.spawn(move || {
          let result = format!(r#"{{"n": {}}}"#, i);
          flow
            .effective_output(GREETING_INPUT, &result, "$.task", "$.task.n")
            .unwrap()
        })
      })
      .collect();

    for (i, handle) in handles.into_iter().enumerate() {
      assert_eq!(handle.join().unwrap(), i.to_string());
    }
  });
}
