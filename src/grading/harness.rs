// src/grading/harness.rs

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

/// Builds the sandbox payload for rubric grading.
///
/// Both the learner code and the validation code travel base64-encoded, so
/// quotes, newlines or Python-meaningful tokens inside them can never close
/// the surrounding literal or inject statements into the harness. The script
/// decodes the learner code into `__STUDENT_CODE__` (validation code may
/// also inspect it as a string, e.g. with `ast`), executes it with any raised
/// exception captured into `__exec_error__`, then runs the validation code in
/// the same module namespace so it can reference learner-defined names.
///
/// Validation code is expected to finish by printing a single line of the
/// form `<marker>{"score": ..., "max_score": ..., "breakdown": ..., "errors": ...}`.
pub fn build_rubric_harness(student_code: &str, validation_code: &str) -> String {
    let student_b64 = BASE64.encode(student_code);
    let validation_b64 = BASE64.encode(validation_code);

    format!(
        r#"import base64
import ast
import json

__STUDENT_CODE__ = base64.b64decode("{student_b64}").decode("utf-8")
__VALIDATION_CODE__ = base64.b64decode("{validation_b64}").decode("utf-8")
__exec_error__ = None

try:
    exec(__STUDENT_CODE__)
except Exception as e:
    __exec_error__ = str(e)

exec(compile(__VALIDATION_CODE__, "<validation>", "exec"))
"#
    )
}

/// Builds the sandbox payload for assertion grading: learner code followed by
/// the validation code as plain text. There is no structured extraction step,
/// so no encoding is needed; success is simply "ran without an uncaught
/// error" and failure is read off the error channel.
pub fn build_assertion_harness(student_code: &str, validation_code: &str) -> String {
    format!("{student_code}\n\n{validation_code}\n")
}
