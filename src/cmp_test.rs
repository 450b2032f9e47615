use super::*;

#[test]
fn test_natural() {
    assert_eq!(Natural.compare(&1, &2).unwrap(), Ordering::Less);
    assert_eq!(Natural.compare(&2, &2).unwrap(), Ordering::Equal);
    assert_eq!(Natural.compare("b", "a").unwrap(), Ordering::Greater);
    assert_eq!(
        Natural.compare(&"sam".to_string(), &"alice".to_string()).unwrap(),
        Ordering::Greater
    );
}

#[test]
fn test_closure() {
    let cmp = |a: &u64, b: &u64| b.cmp(a);
    assert_eq!(cmp.compare(&1, &2).unwrap(), Ordering::Greater);
    assert_eq!(cmp.compare(&3, &3).unwrap(), Ordering::Equal);
}

#[test]
fn test_three_way() {
    let cmp = ThreeWay(|a: &i32, b: &i32| a - b);
    assert_eq!(cmp.compare(&-10, &5).unwrap(), Ordering::Less);
    assert_eq!(cmp.compare(&5, &5).unwrap(), Ordering::Equal);
    assert_eq!(cmp.compare(&100, &5).unwrap(), Ordering::Greater);

    // any negative or positive magnitude is accepted.
    let cmp = ThreeWay(|a: &i32, b: &i32| if a < b { -42 } else if a > b { 7 } else { 0 });
    assert_eq!(cmp.compare(&1, &2).unwrap(), Ordering::Less);
    assert_eq!(cmp.compare(&2, &1).unwrap(), Ordering::Greater);
}

#[test]
fn test_int_cmp() {
    let (a, b) = (Value::Int(-3), Value::Int(12));
    assert_eq!(IntCmp.compare(&a, &b).unwrap(), Ordering::Less);
    assert_eq!(IntCmp.compare(&b, &a).unwrap(), Ordering::Greater);
    assert_eq!(IntCmp.compare(&a, &a).unwrap(), Ordering::Equal);

    match IntCmp.compare(&a, &Value::from("x")) {
        Err(Error::TypeMismatch(_, msg)) => assert!(msg.contains("string"), "{}", msg),
        res => panic!("unexpected {:?}", res),
    }
}

#[test]
fn test_str_cmp() {
    let (a, b) = (Value::from("alice"), Value::from("sam".to_string()));
    assert_eq!(StrCmp.compare(&a, &b).unwrap(), Ordering::Less);
    assert_eq!(StrCmp.compare(&b, &b).unwrap(), Ordering::Equal);

    match StrCmp.compare(&Value::Int(1), &b) {
        Err(err @ Error::TypeMismatch(_, _)) => {
            let s = err.to_string();
            assert!(s.contains("cmp.rs:"), "{}", s);
            assert!(s.contains("TypeMismatch: StrCmp on 1:int and sam:string"), "{}", s);
        }
        res => panic!("unexpected {:?}", res),
    }
}
