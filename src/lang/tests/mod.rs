use super::*;


fn tokens(stream: &mut dyn Stream) -> Vec<String> {
    let mut v = vec![];
    loop {
        let token = next_token(stream).unwrap();
        if token.is_empty() {
            return v;
        }
        v.push(String::from_utf8(token).unwrap());
    }
}
