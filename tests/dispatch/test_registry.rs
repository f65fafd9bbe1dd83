use dispatch_lib::config::models::RegistryConfig;
use dispatch_lib::extraction::types::ArgValue;
use dispatch_lib::registry::{
    Arguments, FunctionRegistry, FunctionSpec, InvocationError, ParamType, RegistryError,
};

fn numbers(pairs: &[(&str, f64)]) -> Arguments {
    pairs
        .iter()
        .map(|(name, value)| (*name, ArgValue::Number(*value)))
        .collect()
}

#[test]
fn test_builtins_registered() {
    let registry = FunctionRegistry::with_builtins();
    assert_eq!(registry.len(), 4);
    assert_eq!(registry.names(), vec!["add", "divide", "multiply", "subtract"]);
    for name in registry.names() {
        let spec = registry.lookup(name).unwrap();
        let params: Vec<&str> = spec.parameter_names().collect();
        assert_eq!(params, vec!["a", "b"]);
        assert!(spec.parameters.iter().all(|p| p.r#type == ParamType::Number));
    }
}

#[test]
fn test_lookup_unknown_is_none() {
    let registry = FunctionRegistry::with_builtins();
    assert!(registry.lookup("square").is_none());
    assert!(registry.lookup("Add").is_none());
}

#[test]
fn test_builtin_results_match_ieee_arithmetic() {
    let registry = FunctionRegistry::with_builtins();
    let cases = [(3.0, 4.0), (-2.5, 0.5), (1e308, 1e308), (0.1, 0.2)];
    for (a, b) in cases {
        let args = numbers(&[("a", a), ("b", b)]);
        assert_eq!(registry.lookup("add").unwrap().invoke(&args), Ok(a + b));
        assert_eq!(registry.lookup("subtract").unwrap().invoke(&args), Ok(a - b));
        assert_eq!(registry.lookup("multiply").unwrap().invoke(&args), Ok(a * b));
        assert_eq!(registry.lookup("divide").unwrap().invoke(&args), Ok(a / b));
    }
}

#[test]
fn test_divide_by_zero_policy() {
    let registry = FunctionRegistry::with_builtins();
    let args = numbers(&[("a", 10.0), ("b", 0.0)]);
    assert_eq!(
        registry.lookup("divide").unwrap().invoke(&args),
        Err(InvocationError::DivisionByZero)
    );
}

#[test]
fn test_register_custom_function() {
    let mut registry = FunctionRegistry::new();
    assert!(registry.is_empty());
    registry
        .register(FunctionSpec::new(
            "negate",
            &[("x", ParamType::Number)],
            |args| Ok(-args.number("x")?),
        ))
        .unwrap();

    let args = numbers(&[("x", 2.0)]);
    assert_eq!(registry.lookup("negate").unwrap().invoke(&args), Ok(-2.0));
}

#[test]
fn test_register_duplicate_rejected() {
    let mut registry = FunctionRegistry::with_builtins();
    let result = registry.register(FunctionSpec::new("add", &[], |_| Ok(0.0)));
    assert_eq!(result, Err(RegistryError::Duplicate("add".to_string())));
    assert_eq!(registry.len(), 4);
}

#[test]
fn test_registry_from_config() {
    let basic = FunctionRegistry::from_config(&RegistryConfig::default()).unwrap();
    assert_eq!(basic.len(), 4);

    let extended = FunctionRegistry::from_config(&RegistryConfig { extended: true }).unwrap();
    assert_eq!(extended.len(), 11);
    assert!(extended.lookup("factorial").is_some());
    assert!(extended.lookup("scientific_constant").is_some());
    assert!(extended.lookup("square_root").is_some());
    assert!(extended.lookup("percentage").is_some());
}
