use super::types::{Arguments, FunctionSpec, InvocationError, ParamType};

pub const ADD: &str = "add";
pub const SUBTRACT: &str = "subtract";
pub const MULTIPLY: &str = "multiply";
pub const DIVIDE: &str = "divide";
pub const POWER: &str = "power";
pub const MODULUS: &str = "modulus";
pub const PERCENTAGE: &str = "percentage";
pub const SQUARE_ROOT: &str = "square_root";
pub const FACTORIAL: &str = "factorial";
pub const PERMUTATIONS: &str = "permutations";
pub const SCIENTIFIC_CONSTANT: &str = "scientific_constant";

/// Largest n whose factorial is finite as an f64.
const MAX_FACTORIAL: f64 = 170.0;

const CONSTANTS: &[(&str, f64)] = &[
    ("speed_of_light", 299_792_458.0),
    ("gravitational_constant", 6.67430e-11),
    ("planck_constant", 6.62607015e-34),
    ("boltzmann_constant", 1.380649e-23),
    ("avogadro_constant", 6.02214076e23),
    ("gas_constant", 8.314462618),
    ("electron_charge", 1.602176634e-19),
];

const BINARY: &[(&str, ParamType)] = &[("a", ParamType::Number), ("b", ParamType::Number)];

fn operands(args: &Arguments) -> Result<(f64, f64), InvocationError> {
    Ok((args.number("a")?, args.number("b")?))
}

/// Product of the `count` integers ending at `top`, i.e. top! / (top - count)!.
fn falling_product(top: f64, count: f64) -> f64 {
    let mut product = 1.0;
    let mut factor = top;
    while factor > top - count {
        product *= factor;
        factor -= 1.0;
    }
    product
}

fn non_negative(name: &str, value: f64) -> Result<f64, InvocationError> {
    if value < 0.0 {
        return Err(InvocationError::Domain(format!(
            "{name} must be non-negative, got {value}"
        )));
    }
    if value > MAX_FACTORIAL {
        return Err(InvocationError::Domain(format!(
            "{name} must be at most {MAX_FACTORIAL}, got {value}"
        )));
    }
    Ok(value)
}

/// add, subtract, multiply, divide over numeric `a` and `b`.
pub fn builtins() -> Vec<FunctionSpec> {
    vec![
        FunctionSpec::new(ADD, BINARY, |args| {
            let (a, b) = operands(args)?;
            Ok(a + b)
        }),
        FunctionSpec::new(SUBTRACT, BINARY, |args| {
            let (a, b) = operands(args)?;
            Ok(a - b)
        }),
        FunctionSpec::new(MULTIPLY, BINARY, |args| {
            let (a, b) = operands(args)?;
            Ok(a * b)
        }),
        FunctionSpec::new(DIVIDE, BINARY, |args| {
            let (a, b) = operands(args)?;
            if b == 0.0 {
                return Err(InvocationError::DivisionByZero);
            }
            Ok(a / b)
        }),
    ]
}

/// Opt-in scientific helpers layered on top of the builtins.
pub fn extended() -> Vec<FunctionSpec> {
    vec![
        FunctionSpec::new(
            POWER,
            &[("x", ParamType::Number), ("y", ParamType::Number)],
            |args| Ok(args.number("x")?.powf(args.number("y")?)),
        ),
        FunctionSpec::new(MODULUS, BINARY, |args| {
            let (a, b) = operands(args)?;
            if b == 0.0 {
                return Err(InvocationError::DivisionByZero);
            }
            Ok(a % b)
        }),
        FunctionSpec::new(
            PERCENTAGE,
            &[("part", ParamType::Number), ("whole", ParamType::Number)],
            |args| {
                let whole = args.number("whole")?;
                if whole == 0.0 {
                    return Err(InvocationError::DivisionByZero);
                }
                Ok(args.number("part")? / whole * 100.0)
            },
        ),
        FunctionSpec::new(SQUARE_ROOT, &[("a", ParamType::Number)], |args| {
            let a = args.number("a")?;
            if a < 0.0 {
                return Err(InvocationError::Domain(format!(
                    "square root of negative number {a}"
                )));
            }
            Ok(a.sqrt())
        }),
        FunctionSpec::new(FACTORIAL, &[("n", ParamType::Integer)], |args| {
            let n = non_negative("n", args.number("n")?)?;
            Ok(falling_product(n, n))
        }),
        FunctionSpec::new(
            PERMUTATIONS,
            &[("n", ParamType::Integer), ("k", ParamType::Integer)],
            |args| {
                let n = non_negative("n", args.number("n")?)?;
                let k = non_negative("k", args.number("k")?)?;
                if k > n {
                    return Ok(0.0);
                }
                Ok(falling_product(n, k))
            },
        ),
        FunctionSpec::new(
            SCIENTIFIC_CONSTANT,
            &[("name", ParamType::String)],
            |args| {
                let name = args.text("name")?.trim().to_lowercase();
                CONSTANTS
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| InvocationError::Domain(format!("unknown constant '{name}'")))
            },
        ),
    ]
}
