//! Snapshot of a complete response document.
//!
//! The response is the wire contract; this pins its field names, ordering and the optional
//! diagnostics array.

use svtopo::{Analyzer, AnalyzerConfig, MemoryLoader, Request};

#[test]
fn response_document() {
    let loader = MemoryLoader::new()
        .with_file("top.sv", "module top;\n  core u_core ();\n  ghost u_ghost ();\nendmodule\n")
        .with_file("core.sv", "module core;\nendmodule\nendmodule\n");
    let request = Request::new(vec!["top.sv".into(), "core.sv".into()], vec![]);
    let analysis = Analyzer::with_loader(AnalyzerConfig::default(), loader).analyze(&request);
    let json = serde_json::to_string_pretty(&analysis.to_response()).unwrap();

    insta::assert_snapshot!(json, @r#"
    {
      "modules": {
        "declarations": {
          "core": {
            "name": "core",
            "file": "core.sv",
            "line": 1
          },
          "top": {
            "name": "top",
            "file": "top.sv",
            "line": 1
          }
        },
        "instances": {
          "core": [
            {
              "name": "core",
              "file": "top.sv",
              "line": 2
            }
          ],
          "ghost": [
            {
              "name": "ghost",
              "file": "top.sv",
              "line": 3
            }
          ]
        },
        "exports": {
          "top": {
            "name": "top",
            "file": "top.sv",
            "line": 1
          }
        },
        "missing": {
          "ghost": [
            {
              "name": "ghost",
              "file": "top.sv",
              "line": 3
            }
          ]
        }
      },
      "diagnostics": [
        {
          "severity": "warning",
          "code": "svtopo::stray_endmodule",
          "message": "`endmodule` outside of any module",
          "file": "core.sv",
          "line": 3
        }
      ]
    }
    "#);
}
